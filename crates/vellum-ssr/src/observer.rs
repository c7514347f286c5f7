//! Render-start instrumentation.

use vellum_core::vnode::ComponentNode;

/// Observer invoked once per component node, before the component is
/// instantiated.
///
/// The renderer reads no return value and installs no panic guard: a
/// panicking observer unwinds out of the whole render call, and guarding
/// against that is the caller's responsibility.
pub trait RenderObserver: Send + Sync {
	/// Called with the component node about to render.
	fn component_will_render(&self, node: &ComponentNode);
}

impl<F> RenderObserver for F
where
	F: Fn(&ComponentNode) + Send + Sync,
{
	fn component_will_render(&self, node: &ComponentNode) {
		self(node)
	}
}
