//! The recursive render core: node dispatch, component invocation,
//! context propagation, and element serialization.
//!
//! One synchronous, depth-first pass over the tree. The only value
//! mutated across the recursion is the per-call [`SelectCursor`]; the
//! context travels by copy-on-fork and every component instance is
//! discarded after its single render.

use std::sync::Arc;

use tracing::{debug, trace};
use vellum_core::component::{ComponentDef, ComponentInstance, HookSet};
use vellum_core::context::RenderContext;
use vellum_core::props::{CHILDREN, DANGEROUS_INNER_HTML, KEY, PropValue, REF};
use vellum_core::util::{encode_entities, is_unsafe_name, is_void_element, style_to_css};
use vellum_core::vnode::{ComponentNode, Element, VNode};

use crate::observer::RenderObserver;

/// Renders a root value to a markup string with default options and no
/// observer.
pub fn render_to_string(node: &VNode) -> String {
	Renderer::new().render(node)
}

/// Options for the configured renderer.
#[derive(Debug, Clone)]
pub struct RenderOptions {
	/// Language attribute for the document wrapper's `html` element.
	pub lang: String,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			lang: "en".to_string(),
		}
	}
}

impl RenderOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the language.
	pub fn lang(mut self, lang: impl Into<String>) -> Self {
		self.lang = lang.into();
		self
	}
}

/// The value currently considered "chosen" for the nearest enclosing
/// select-like element.
///
/// One cursor is local to one top-level render call and threaded by
/// `&mut` through the recursion, so consumption by an option-like
/// element is visible to every later sibling in the same pass. A
/// select-like element carrying a `value` property starts a fresh cursor
/// for its own subtree; the inherited cursor is untouched afterwards.
#[derive(Debug, Default)]
pub struct SelectCursor(Option<PropValue>);

impl SelectCursor {
	/// A cursor holding a chosen value.
	pub fn holding(value: PropValue) -> Self {
		Self(Some(value))
	}

	fn matches(&self, value: &PropValue) -> bool {
		self.0.as_ref() == Some(value)
	}

	fn consume(&mut self) {
		self.0 = None;
	}
}

/// The configured renderer: options plus the optional render observer.
pub struct Renderer {
	options: RenderOptions,
	observer: Option<Arc<dyn RenderObserver>>,
}

impl Default for Renderer {
	fn default() -> Self {
		Self::new()
	}
}

impl Renderer {
	/// Creates a renderer with default options.
	pub fn new() -> Self {
		Self {
			options: RenderOptions::default(),
			observer: None,
		}
	}

	/// Creates a renderer with custom options.
	pub fn with_options(options: RenderOptions) -> Self {
		Self {
			options,
			observer: None,
		}
	}

	/// Installs the render-start observer, invoked once per component
	/// node before instantiation.
	pub fn observer(mut self, observer: Arc<dyn RenderObserver>) -> Self {
		self.observer = Some(observer);
		self
	}

	/// Returns the renderer's options.
	pub fn options(&self) -> &RenderOptions {
		&self.options
	}

	/// Renders a root value to a markup string.
	///
	/// Either the complete string is returned or a panic from component
	/// code unwinds out of this call; there is no partial output.
	pub fn render(&self, node: &VNode) -> String {
		let mut out = String::new();
		let mut select = SelectCursor::default();
		self.render_node(node, &RenderContext::new(), &mut select, &mut out);
		out
	}

	/// Dispatches one render-able value.
	fn render_node(
		&self,
		node: &VNode,
		context: &RenderContext,
		select: &mut SelectCursor,
		out: &mut String,
	) {
		match node {
			VNode::Empty => {}
			VNode::Text(text) => out.push_str(&encode_entities(text)),
			VNode::Sequence(items) => {
				for item in items {
					self.render_node(item, context, select, out);
				}
			}
			VNode::Component(component) => self.render_component(component, context, select, out),
			VNode::Element(element) => {
				// Malformed tag names are dropped, not reported.
				if is_unsafe_name(element.tag()) {
					return;
				}
				self.render_element(element, context, select, out);
			}
		}
	}

	fn render_component(
		&self,
		node: &ComponentNode,
		context: &RenderContext,
		select: &mut SelectCursor,
		out: &mut String,
	) {
		if let Some(observer) = &self.observer {
			observer.component_will_render(node);
		}
		debug!(component = node.name(), "rendering component node");

		// A declared slot narrows the context seen by this component to
		// the slot entry alone; without one the ambient context passes
		// through whole.
		let narrowed = node.slot().map(|slot| slot.narrowed(context));
		let effective = narrowed.as_ref().unwrap_or(context);

		match node.def() {
			ComponentDef::Function(call) => {
				let subtree = call(node.props(), effective);
				self.render_node(&subtree, effective, select, out);
			}
			ComponentDef::Stateful(component) => {
				let mut instance = ComponentInstance::new(
					node.props(),
					effective.clone(),
					component.initial_state(node.props()),
				);

				// Exactly one pre-render hook runs; deriving from
				// properties wins over will-mount.
				let hooks = component.hooks();
				if hooks.contains(HookSet::DERIVE_STATE) {
					let update = component.derive_state(instance.props(), instance.state());
					instance.merge_state(update);
				} else if hooks.contains(HookSet::WILL_MOUNT) {
					component.will_mount(&mut instance);
				}
				instance.apply_pending();

				let subtree =
					component.render(instance.props(), instance.state(), instance.context());

				let forked;
				let subtree_context = if hooks.contains(HookSet::CHILD_CONTEXT) {
					trace!(component = node.name(), "forking child context");
					forked = context.fork_with(component.child_context(&instance));
					&forked
				} else {
					effective
				};
				self.render_node(&subtree, subtree_context, select, out);
			}
		}
	}

	fn render_element(
		&self,
		element: &Element,
		context: &RenderContext,
		select: &mut SelectCursor,
		out: &mut String,
	) {
		let tag = element.tag();
		out.push('<');
		out.push_str(tag);

		let is_select = tag == "select";
		let is_option = tag == "option";
		let mut scoped: Option<SelectCursor> = None;
		let mut raw_body = None;

		for (name, value) in element.props().iter() {
			if name == CHILDREN || name == KEY || name == REF || is_unsafe_name(name) {
				continue;
			}
			if is_option && name == "value" && select.matches(value) {
				// First match wins; the flag replaces the value attribute.
				out.push_str(" selected");
				trace!("select cursor consumed");
				select.consume();
			} else if is_select && name == "value" {
				// Not an attribute: becomes the chosen value for this
				// subtree, overriding any inherited cursor.
				scoped = Some(SelectCursor::holding(value.clone()));
			} else if name == DANGEROUS_INNER_HTML {
				raw_body = value.to_text();
			} else {
				if value.is_skippable_attr() {
					continue;
				}

				let name = match name.strip_prefix("xlink") {
					Some(rest)
						if rest
							.chars()
							.next()
							.is_some_and(|first| first.is_ascii_uppercase()) =>
					{
						let mut namespaced = String::with_capacity(name.len() + 1);
						namespaced.push_str("xlink:");
						namespaced.push_str(&rest[..1].to_ascii_lowercase());
						namespaced.push_str(&rest[1..]);
						std::borrow::Cow::Owned(namespaced)
					}
					_ => std::borrow::Cow::Borrowed(name),
				};

				// Boolean `true` and the empty string emit the name alone.
				let bare = matches!(value, PropValue::Bool(true))
					|| matches!(value, PropValue::Str(s) if s.is_empty());

				let text = match value {
					PropValue::Style(style) if name == "style" => {
						Some(std::borrow::Cow::Owned(style_to_css(style)))
					}
					_ if bare => None,
					_ => value.to_text(),
				};

				if !bare && text.is_none() {
					// Nested nodes and style maps under other names have
					// no attribute form.
					continue;
				}

				out.push(' ');
				out.push_str(&name);
				if let Some(text) = text {
					out.push_str("=\"");
					out.push_str(&encode_entities(&text));
					out.push('"');
				}
			}
		}

		if is_void_element(tag) {
			// Void tags never receive a body or closing tag; supplied
			// children and raw content are discarded.
			out.push_str(" />");
			return;
		}
		out.push('>');

		if let Some(raw) = raw_body {
			out.push_str(&raw);
		} else if let Some(children) = element.props().children() {
			let cursor = match scoped.as_mut() {
				Some(scoped) => scoped,
				None => select,
			};
			self.render_node(children, context, cursor, out);
		}

		out.push_str("</");
		out.push_str(tag);
		out.push('>');
	}
}
