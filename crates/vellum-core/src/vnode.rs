//! The virtual-node tree: the closed set of render-able values and the
//! builders that construct them.
//!
//! Classification happens once, at this type boundary. Dynamic values
//! (booleans, unit, `None`, numbers, strings, sequences) become enum
//! variants through [`IntoVNode`]; the renderer never inspects value
//! shapes mid-recursion.
//!
//! ## Example
//!
//! ```ignore
//! use vellum_core::vnode::{Element, IntoVNode};
//!
//! let view = Element::new("div")
//!     .attr("class", "container")
//!     .child("Hello, World!")
//!     .into_vnode();
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::component::{Component, ComponentDef};
use crate::context::{ContextSlot, RenderContext};
use crate::props::{CHILDREN, DANGEROUS_INNER_HTML, KEY, PropValue, Props, StyleMap};

/// A render-able value.
#[derive(Debug, Clone)]
pub enum VNode {
	/// Renders nothing. `None`, `()`, and booleans convert here.
	Empty,
	/// A text node, entity-encoded on output.
	Text(Cow<'static, str>),
	/// An ordered sequence rendered by concatenation, sharing one
	/// context and one select cursor across the whole run.
	Sequence(Vec<VNode>),
	/// A markup element: tag name plus ordered properties.
	Element(Element),
	/// A component node, resolved by the component invoker.
	Component(ComponentNode),
}

impl VNode {
	/// Starts an element builder.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> Element {
		Element::new(tag)
	}

	/// Creates a text node.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		VNode::Text(content.into())
	}

	/// Creates a sequence from anything render-able.
	pub fn sequence(items: impl IntoIterator<Item = impl IntoVNode>) -> Self {
		VNode::Sequence(items.into_iter().map(IntoVNode::into_vnode).collect())
	}

	/// Creates an empty node.
	pub fn empty() -> Self {
		VNode::Empty
	}

	/// Creates a function-component node.
	pub fn component(
		name: impl Into<Cow<'static, str>>,
		props: Props,
		call: impl Fn(&Props, &RenderContext) -> VNode + Send + Sync + 'static,
	) -> Self {
		VNode::Component(ComponentNode::function(name, props, call))
	}

	/// Creates a capability-bearing component node.
	pub fn stateful(
		name: impl Into<Cow<'static, str>>,
		props: Props,
		component: Arc<dyn Component>,
	) -> Self {
		VNode::Component(ComponentNode::stateful(name, props, component))
	}
}

/// A markup element: tag name plus ordered properties.
///
/// Doubles as its own builder in the chainable style. Accumulated
/// children land under the reserved `children` property: a single node
/// directly, several as a sequence.
#[derive(Debug, Clone)]
pub struct Element {
	tag: Cow<'static, str>,
	props: Props,
}

impl Element {
	/// Creates a new element.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		Self {
			tag: tag.into(),
			props: Props::new(),
		}
	}

	/// Sets a property.
	pub fn attr(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<PropValue>) -> Self {
		self.props.set(name, value);
		self
	}

	/// Sets a style mapping, serialized to CSS on output.
	pub fn style(self, style: StyleMap) -> Self {
		self.attr("style", style)
	}

	/// Sets the raw-HTML escape hatch: the given markup is emitted
	/// verbatim and unescaped as the body, and child rendering is
	/// suppressed for this element.
	pub fn raw_html(self, html: impl Into<Cow<'static, str>>) -> Self {
		let html = html.into();
		self.attr(DANGEROUS_INNER_HTML, PropValue::Str(html))
	}

	/// Sets the reconciler key (carried, never emitted).
	pub fn key(self, key: impl Into<PropValue>) -> Self {
		self.attr(KEY, key)
	}

	/// Appends a child under the reserved `children` property.
	pub fn child(mut self, child: impl IntoVNode) -> Self {
		let node = child.into_vnode();
		if let Some(PropValue::Node(existing)) = self.props.get_mut(CHILDREN) {
			if let VNode::Sequence(seq) = existing.as_mut() {
				seq.push(node);
			} else {
				let first = std::mem::replace(existing.as_mut(), VNode::Empty);
				**existing = VNode::Sequence(vec![first, node]);
			}
			return self;
		}
		self.props.set(CHILDREN, PropValue::Node(Box::new(node)));
		self
	}

	/// Appends multiple children.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoVNode>) -> Self {
		for child in children {
			self = self.child(child);
		}
		self
	}

	/// The tag name.
	pub fn tag(&self) -> &str {
		&self.tag
	}

	/// The ordered properties, reserved entries included.
	pub fn props(&self) -> &Props {
		&self.props
	}
}

/// A component reference plus the properties it will be invoked with.
pub struct ComponentNode {
	name: Cow<'static, str>,
	def: ComponentDef,
	props: Props,
	slot: Option<ContextSlot>,
}

impl ComponentNode {
	/// Creates a function-component node.
	pub fn function(
		name: impl Into<Cow<'static, str>>,
		props: Props,
		call: impl Fn(&Props, &RenderContext) -> VNode + Send + Sync + 'static,
	) -> Self {
		Self {
			name: name.into(),
			def: ComponentDef::Function(Arc::new(call)),
			props,
			slot: None,
		}
	}

	/// Creates a capability-bearing component node.
	pub fn stateful(
		name: impl Into<Cow<'static, str>>,
		props: Props,
		component: Arc<dyn Component>,
	) -> Self {
		Self {
			name: name.into(),
			def: ComponentDef::Stateful(component),
			props,
			slot: None,
		}
	}

	/// Declares the context slot this component narrows to: its
	/// effective context becomes the slot entry alone, resolved against
	/// the ambient context.
	pub fn context_slot(mut self, slot: ContextSlot) -> Self {
		self.slot = Some(slot);
		self
	}

	/// The component's name, for instrumentation and debugging.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The component definition.
	pub fn def(&self) -> &ComponentDef {
		&self.def
	}

	/// The properties the component will be invoked with.
	pub fn props(&self) -> &Props {
		&self.props
	}

	/// The declared context slot, if any.
	pub fn slot(&self) -> Option<&ContextSlot> {
		self.slot.as_ref()
	}
}

impl Clone for ComponentNode {
	fn clone(&self) -> Self {
		Self {
			name: self.name.clone(),
			def: self.def.clone(),
			props: self.props.clone(),
			slot: self.slot.clone(),
		}
	}
}

impl fmt::Debug for ComponentNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentNode")
			.field("name", &self.name)
			.field("def", &self.def)
			.field("props", &self.props)
			.field("slot", &self.slot)
			.finish()
	}
}

/// Conversion into a render-able value.
///
/// This is the input boundary where dynamic-language classification
/// becomes a closed enum: booleans, unit, and `None` all become
/// [`VNode::Empty`]; numbers become their textual form.
pub trait IntoVNode {
	/// Converts self into a node.
	fn into_vnode(self) -> VNode;
}

impl IntoVNode for VNode {
	fn into_vnode(self) -> VNode {
		self
	}
}

impl IntoVNode for Element {
	fn into_vnode(self) -> VNode {
		VNode::Element(self)
	}
}

impl IntoVNode for ComponentNode {
	fn into_vnode(self) -> VNode {
		VNode::Component(self)
	}
}

impl IntoVNode for &'static str {
	fn into_vnode(self) -> VNode {
		VNode::Text(Cow::Borrowed(self))
	}
}

impl IntoVNode for String {
	fn into_vnode(self) -> VNode {
		VNode::Text(Cow::Owned(self))
	}
}

impl IntoVNode for &String {
	fn into_vnode(self) -> VNode {
		VNode::Text(Cow::Owned(self.clone()))
	}
}

impl IntoVNode for Cow<'static, str> {
	fn into_vnode(self) -> VNode {
		VNode::Text(self)
	}
}

/// Booleans render nothing, so conditions can be written inline.
impl IntoVNode for bool {
	fn into_vnode(self) -> VNode {
		VNode::Empty
	}
}

impl IntoVNode for () {
	fn into_vnode(self) -> VNode {
		VNode::Empty
	}
}

macro_rules! into_vnode_numeric {
	($($t:ty),* $(,)?) => {
		$(
			impl IntoVNode for $t {
				fn into_vnode(self) -> VNode {
					VNode::Text(Cow::Owned(self.to_string()))
				}
			}
		)*
	};
}

into_vnode_numeric!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl<T: IntoVNode> IntoVNode for Option<T> {
	fn into_vnode(self) -> VNode {
		match self {
			Some(value) => value.into_vnode(),
			None => VNode::Empty,
		}
	}
}

impl<T: IntoVNode> IntoVNode for Vec<T> {
	fn into_vnode(self) -> VNode {
		VNode::Sequence(self.into_iter().map(IntoVNode::into_vnode).collect())
	}
}

impl<A: IntoVNode, B: IntoVNode> IntoVNode for (A, B) {
	fn into_vnode(self) -> VNode {
		VNode::Sequence(vec![self.0.into_vnode(), self.1.into_vnode()])
	}
}

impl<A: IntoVNode, B: IntoVNode, C: IntoVNode> IntoVNode for (A, B, C) {
	fn into_vnode(self) -> VNode {
		VNode::Sequence(vec![
			self.0.into_vnode(),
			self.1.into_vnode(),
			self.2.into_vnode(),
		])
	}
}

impl<A: IntoVNode, B: IntoVNode, C: IntoVNode, D: IntoVNode> IntoVNode for (A, B, C, D) {
	fn into_vnode(self) -> VNode {
		VNode::Sequence(vec![
			self.0.into_vnode(),
			self.1.into_vnode(),
			self.2.into_vnode(),
			self.3.into_vnode(),
		])
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_single_child_stored_directly() {
		let element = Element::new("div").child("hi");
		assert!(matches!(
			element.props().children(),
			Some(VNode::Text(t)) if t == "hi"
		));
	}

	#[test]
	fn test_multiple_children_become_sequence() {
		let element = Element::new("ul").child("a").child("b").child("c");
		match element.props().children() {
			Some(VNode::Sequence(items)) => assert_eq!(items.len(), 3),
			other => panic!("expected sequence, got {other:?}"),
		}
	}

	#[test]
	fn test_children_iterator_helper() {
		let element = Element::new("ol").children(vec!["one", "two"]);
		match element.props().children() {
			Some(VNode::Sequence(items)) => assert_eq!(items.len(), 2),
			other => panic!("expected sequence, got {other:?}"),
		}
	}

	#[test]
	fn test_attrs_keep_insertion_order() {
		let element = Element::new("a").attr("href", "/x").attr("id", "l1").attr("class", "nav");
		let names: Vec<&str> = element.props().iter().map(|(n, _)| n).collect();
		assert_eq!(names, ["href", "id", "class"]);
	}

	#[test]
	fn test_raw_html_lands_under_reserved_name() {
		let element = Element::new("div").raw_html("<b>x</b>");
		assert_eq!(
			element.props().get(DANGEROUS_INNER_HTML),
			Some(&PropValue::from("<b>x</b>"))
		);
	}

	#[test]
	fn test_into_vnode_empties() {
		assert!(matches!(true.into_vnode(), VNode::Empty));
		assert!(matches!(false.into_vnode(), VNode::Empty));
		assert!(matches!(().into_vnode(), VNode::Empty));
		assert!(matches!(None::<String>.into_vnode(), VNode::Empty));
	}

	#[test]
	fn test_into_vnode_numbers_become_text() {
		assert!(matches!(42.into_vnode(), VNode::Text(t) if t == "42"));
		assert!(matches!(1.5f64.into_vnode(), VNode::Text(t) if t == "1.5"));
	}

	#[test]
	fn test_into_vnode_collections() {
		assert!(matches!(vec!["a", "b"].into_vnode(), VNode::Sequence(items) if items.len() == 2));
		assert!(matches!(("a", "b", "c").into_vnode(), VNode::Sequence(items) if items.len() == 3));
	}

	#[test]
	fn test_component_node_builder() {
		let node = ComponentNode::function("Greeting", Props::new().with("name", "Ada"), |props, _| {
			VNode::text(format!(
				"Hello, {}!",
				props.get("name").and_then(PropValue::to_text).unwrap_or_default()
			))
		});
		assert_eq!(node.name(), "Greeting");
		assert!(node.slot().is_none());
	}
}
