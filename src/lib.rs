//! # Vellum
//!
//! Component-based virtual-node to HTML string rendering for Rust.
//!
//! Vellum pre-renders a tree of lightweight UI-description values (a
//! virtual node format) into a markup string, so a component-based UI
//! can be produced outside an interactive client and handed to a
//! client-side reconciler. The render pass is one synchronous,
//! depth-first recursion: value classification, component
//! instantiation and lifecycle, context forking across subtrees, and
//! translation of element properties into markup.
//!
//! The workspace splits into two member crates, re-exported here:
//!
//! - `vellum-core` is the data model: virtual nodes, ordered properties,
//!   the component abstraction with capability-flagged lifecycle hooks,
//!   the ambient render context, and the pure escaping/formatting
//!   utilities.
//! - `vellum-ssr` is the renderer: node dispatch, component invocation,
//!   context propagation, element serialization, the render observer,
//!   and full-document wrapping.
//!
//! ## Quick Example
//!
//! ```
//! use vellum::prelude::*;
//!
//! let view = Element::new("div")
//!     .attr("class", "greeting")
//!     .child("Hello, World!")
//!     .into_vnode();
//!
//! assert_eq!(
//!     render_to_string(&view),
//!     "<div class=\"greeting\">Hello, World!</div>"
//! );
//! ```
//!
//! ## Components
//!
//! A component is either one plain callable from (properties, effective
//! context) to a subtree, or a value implementing [`Component`] whose
//! optional lifecycle hooks are declared through the [`HookSet`]
//! discriminant. Instances live for exactly one render call; there is
//! no reconciliation and no persisted state.

pub use vellum_core::component::{
	Component, ComponentDef, ComponentInstance, FunctionComponent, HookSet, State,
};
pub use vellum_core::context::{ContextSlot, RenderContext};
pub use vellum_core::props::{
	CHILDREN, DANGEROUS_INNER_HTML, EventHandler, KEY, PropValue, Props, PropsError, REF, StyleMap,
};
pub use vellum_core::util::{
	VOID_ELEMENTS, encode_entities, is_unsafe_name, is_void_element, style_to_css,
};
pub use vellum_core::vnode::{ComponentNode, Element, IntoVNode, VNode};
pub use vellum_ssr::{RenderObserver, RenderOptions, Renderer, SelectCursor, render_to_string};

pub mod prelude {
	//! Convenient glob import for building and rendering trees.

	pub use vellum_core::component::{Component, ComponentInstance, HookSet, State};
	pub use vellum_core::context::{ContextSlot, RenderContext};
	pub use vellum_core::props::{PropValue, Props, StyleMap};
	pub use vellum_core::vnode::{ComponentNode, Element, IntoVNode, VNode};
	pub use vellum_ssr::{RenderObserver, RenderOptions, Renderer, render_to_string};
}
