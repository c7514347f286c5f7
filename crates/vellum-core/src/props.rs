//! Property values and the ordered property mapping carried by nodes.
//!
//! Properties are dynamically shaped: a closed [`PropValue`] enum covers
//! scalars, style mappings, event-handler-shaped callables, and nested
//! nodes (the carrier of the reserved `children` entry). [`Props`]
//! preserves insertion order, which the element serializer relies on for
//! attribute output.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::vnode::{IntoVNode, VNode};

/// Reserved property name carrying an element's body content.
pub const CHILDREN: &str = "children";

/// Reserved property name used by external reconcilers to key siblings.
pub const KEY: &str = "key";

/// Reserved property name used by external reconcilers for node handles.
pub const REF: &str = "ref";

/// Property name of the raw-HTML escape hatch.
///
/// Its value is emitted verbatim and unescaped as the element's body,
/// and suppresses normal child rendering for that element.
pub const DANGEROUS_INNER_HTML: &str = "dangerous_inner_html";

/// An event-handler-shaped property value.
///
/// Handlers are accepted so trees built for an interactive client can be
/// pre-rendered unchanged; the renderer never invokes or serializes them.
pub type EventHandler = Arc<dyn Fn() + Send + Sync>;

/// A property value.
#[derive(Clone)]
pub enum PropValue {
	/// No value; never emitted.
	Null,
	/// A flag value: `true` emits the bare attribute name, `false` is
	/// skipped.
	Bool(bool),
	/// An integer value. The literal `0` is kept where other falsy
	/// values are skipped.
	Int(i64),
	/// A floating-point value.
	Float(f64),
	/// A text value. The empty string is skipped in attribute position.
	Str(Cow<'static, str>),
	/// An ordered style mapping, serialized to CSS in attribute position.
	Style(StyleMap),
	/// An event-handler-shaped callable; meaningless in static markup
	/// and always skipped.
	Handler(EventHandler),
	/// A nested render-able value; carrier of the reserved `children`
	/// entry.
	Node(Box<VNode>),
}

impl PropValue {
	/// Creates a handler value from a closure.
	pub fn handler(f: impl Fn() + Send + Sync + 'static) -> Self {
		PropValue::Handler(Arc::new(f))
	}

	/// Creates a node value from anything render-able.
	pub fn node(node: impl IntoVNode) -> Self {
		PropValue::Node(Box::new(node.into_vnode()))
	}

	/// The textual form used for attribute emission and raw-body
	/// capture, if the value has one.
	pub fn to_text(&self) -> Option<Cow<'_, str>> {
		match self {
			PropValue::Str(s) => Some(Cow::Borrowed(s.as_ref())),
			PropValue::Int(n) => Some(Cow::Owned(n.to_string())),
			PropValue::Float(x) => Some(Cow::Owned(x.to_string())),
			PropValue::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
			PropValue::Null | PropValue::Style(_) | PropValue::Handler(_) | PropValue::Node(_) => {
				None
			}
		}
	}

	/// Whether an attribute with this value is skipped entirely.
	///
	/// `Null`, `false`, and the empty string never appear as attributes
	/// (the literal numeric `0` is kept), and neither do handler values.
	pub fn is_skippable_attr(&self) -> bool {
		match self {
			PropValue::Null | PropValue::Bool(false) | PropValue::Handler(_) => true,
			PropValue::Str(s) => s.is_empty(),
			_ => false,
		}
	}

	/// The nested node, when this value carries one.
	pub fn as_node(&self) -> Option<&VNode> {
		match self {
			PropValue::Node(node) => Some(node),
			_ => None,
		}
	}

	/// JSON form for the typed-props helpers; handlers and nodes have
	/// none and are skipped by the conversion.
	fn to_json(&self) -> Option<serde_json::Value> {
		match self {
			PropValue::Null => Some(serde_json::Value::Null),
			PropValue::Bool(b) => Some((*b).into()),
			PropValue::Int(n) => Some((*n).into()),
			PropValue::Float(x) => serde_json::Number::from_f64(*x).map(serde_json::Value::Number),
			PropValue::Str(s) => Some(s.as_ref().into()),
			PropValue::Style(style) => Some(serde_json::Value::Object(
				style
					.iter()
					.filter_map(|(name, value)| value.to_json().map(|json| (name.to_string(), json)))
					.collect(),
			)),
			PropValue::Handler(_) | PropValue::Node(_) => None,
		}
	}
}

impl fmt::Debug for PropValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PropValue::Null => f.write_str("Null"),
			PropValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
			PropValue::Int(n) => f.debug_tuple("Int").field(n).finish(),
			PropValue::Float(x) => f.debug_tuple("Float").field(x).finish(),
			PropValue::Str(s) => f.debug_tuple("Str").field(s).finish(),
			PropValue::Style(style) => f.debug_tuple("Style").field(style).finish(),
			PropValue::Handler(_) => f.write_str("Handler(<closure>)"),
			PropValue::Node(node) => f.debug_tuple("Node").field(node).finish(),
		}
	}
}

impl PartialEq for PropValue {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(PropValue::Null, PropValue::Null) => true,
			(PropValue::Bool(a), PropValue::Bool(b)) => a == b,
			(PropValue::Int(a), PropValue::Int(b)) => a == b,
			(PropValue::Float(a), PropValue::Float(b)) => a == b,
			// Numbers compare across representations, like the single
			// number type of the trees' dynamic-language ancestry.
			(PropValue::Int(a), PropValue::Float(b)) | (PropValue::Float(b), PropValue::Int(a)) => {
				*a as f64 == *b
			}
			(PropValue::Str(a), PropValue::Str(b)) => a == b,
			(PropValue::Style(a), PropValue::Style(b)) => a == b,
			(PropValue::Handler(a), PropValue::Handler(b)) => Arc::ptr_eq(a, b),
			_ => false,
		}
	}
}

impl From<bool> for PropValue {
	fn from(value: bool) -> Self {
		PropValue::Bool(value)
	}
}

impl From<&'static str> for PropValue {
	fn from(value: &'static str) -> Self {
		PropValue::Str(Cow::Borrowed(value))
	}
}

impl From<String> for PropValue {
	fn from(value: String) -> Self {
		PropValue::Str(Cow::Owned(value))
	}
}

impl From<Cow<'static, str>> for PropValue {
	fn from(value: Cow<'static, str>) -> Self {
		PropValue::Str(value)
	}
}

impl From<StyleMap> for PropValue {
	fn from(value: StyleMap) -> Self {
		PropValue::Style(value)
	}
}

macro_rules! prop_value_from_int {
	($($t:ty),* $(,)?) => {
		$(
			impl From<$t> for PropValue {
				fn from(value: $t) -> Self {
					PropValue::Int(value as i64)
				}
			}
		)*
	};
}

prop_value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for PropValue {
	fn from(value: f32) -> Self {
		PropValue::Float(value as f64)
	}
}

impl From<f64> for PropValue {
	fn from(value: f64) -> Self {
		PropValue::Float(value)
	}
}

impl From<serde_json::Value> for PropValue {
	/// Scalar JSON values map directly; arrays and objects have no
	/// property shape and map to `Null`.
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => PropValue::Null,
			serde_json::Value::Bool(b) => PropValue::Bool(b),
			serde_json::Value::Number(n) => match n.as_i64() {
				Some(i) => PropValue::Int(i),
				None => PropValue::Float(n.as_f64().unwrap_or(0.0)),
			},
			serde_json::Value::String(s) => PropValue::Str(Cow::Owned(s)),
			serde_json::Value::Array(_) | serde_json::Value::Object(_) => PropValue::Null,
		}
	}
}

/// An insertion-ordered style property mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap(Vec<(Cow<'static, str>, PropValue)>);

impl StyleMap {
	/// Creates an empty style mapping.
	pub fn new() -> Self {
		Self(Vec::new())
	}

	/// Sets a property, replacing any previous value in place.
	pub fn set(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<PropValue>) -> Self {
		let name = name.into();
		let value = value.into();
		if let Some(entry) = self.0.iter_mut().find(|(n, _)| *n == name) {
			entry.1 = value;
		} else {
			self.0.push((name, value));
		}
		self
	}

	/// Iterates entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
		self.0.iter().map(|(name, value)| (name.as_ref(), value))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Errors from the typed-props helpers.
///
/// These sit outside the render path; rendering itself never constructs
/// an error.
#[derive(Debug, thiserror::Error)]
pub enum PropsError {
	/// The underlying serialization failed.
	#[error("property serialization failed: {0}")]
	Serialize(#[from] serde_json::Error),
	/// The serialized form was not an object with named fields.
	#[error("expected an object with named fields, got {0}")]
	NotAnObject(&'static str),
}

/// The insertion-ordered property mapping attached to elements and
/// component nodes.
///
/// Lookup is linear; property counts are small. `set` replaces an
/// existing entry in place, preserving its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props(Vec<(Cow<'static, str>, PropValue)>);

impl Props {
	/// Creates an empty property mapping.
	pub fn new() -> Self {
		Self(Vec::new())
	}

	/// Chainable set, for literal construction.
	pub fn with(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<PropValue>) -> Self {
		self.set(name, value);
		self
	}

	/// Sets a property, replacing any previous value in place.
	pub fn set(&mut self, name: impl Into<Cow<'static, str>>, value: impl Into<PropValue>) {
		let name = name.into();
		let value = value.into();
		if let Some(entry) = self.0.iter_mut().find(|(n, _)| *n == name) {
			entry.1 = value;
		} else {
			self.0.push((name, value));
		}
	}

	/// Looks up a property by name.
	pub fn get(&self, name: &str) -> Option<&PropValue> {
		self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
	}

	pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut PropValue> {
		self.0.iter_mut().find(|(n, _)| n == name).map(|(_, v)| v)
	}

	/// Iterates entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
		self.0.iter().map(|(name, value)| (name.as_ref(), value))
	}

	/// The reserved `children` entry, when it carries a node.
	pub fn children(&self) -> Option<&VNode> {
		self.get(CHILDREN).and_then(PropValue::as_node)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Builds a property mapping from any serializable struct.
	///
	/// Field order follows the serialized object form. `None` fields
	/// serialize to `Null` and are carried (and later skipped in
	/// attribute position).
	pub fn from_serialize<P: Serialize>(value: &P) -> Result<Self, PropsError> {
		let json = serde_json::to_value(value)?;
		let serde_json::Value::Object(fields) = json else {
			return Err(PropsError::NotAnObject(json_kind(&json)));
		};
		let mut props = Props::new();
		for (name, value) in fields {
			props.set(name, PropValue::from(value));
		}
		Ok(props)
	}

	/// Reconstructs a typed value from the scalar entries.
	///
	/// Handler and node values have no serialized form and are skipped.
	pub fn to_typed<P: DeserializeOwned>(&self) -> Result<P, PropsError> {
		let mut fields = serde_json::Map::new();
		for (name, value) in self.iter() {
			if let Some(json) = value.to_json() {
				fields.insert(name.to_string(), json);
			}
		}
		serde_json::from_value(serde_json::Value::Object(fields)).map_err(Into::into)
	}
}

fn json_kind(value: &serde_json::Value) -> &'static str {
	match value {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool(_) => "a boolean",
		serde_json::Value::Number(_) => "a number",
		serde_json::Value::String(_) => "a string",
		serde_json::Value::Array(_) => "an array",
		serde_json::Value::Object(_) => "an object",
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn test_props_preserve_insertion_order() {
		let props = Props::new().with("b", 1).with("a", 2).with("c", 3);
		let names: Vec<&str> = props.iter().map(|(n, _)| n).collect();
		assert_eq!(names, ["b", "a", "c"]);
	}

	#[test]
	fn test_props_set_replaces_in_place() {
		let mut props = Props::new().with("a", 1).with("b", 2);
		props.set("a", 9);
		let entries: Vec<(&str, &PropValue)> = props.iter().collect();
		assert_eq!(entries[0], ("a", &PropValue::Int(9)));
		assert_eq!(props.len(), 2);
	}

	#[test]
	fn test_children_accessor() {
		let props = Props::new().with(CHILDREN, PropValue::node("hi"));
		assert!(matches!(props.children(), Some(VNode::Text(t)) if t == "hi"));
		let plain = Props::new().with(CHILDREN, "not a node");
		assert!(plain.children().is_none());
	}

	#[rstest]
	#[case::null(PropValue::Null, true)]
	#[case::bool_false(PropValue::Bool(false), true)]
	#[case::bool_true(PropValue::Bool(true), false)]
	#[case::empty_str(PropValue::from(""), true)]
	#[case::str(PropValue::from("x"), false)]
	#[case::zero(PropValue::Int(0), false)]
	#[case::float_zero(PropValue::Float(0.0), false)]
	fn test_skippable_attrs(#[case] value: PropValue, #[case] skipped: bool) {
		assert_eq!(value.is_skippable_attr(), skipped);
	}

	#[test]
	fn test_handler_is_skippable_and_opaque() {
		let handler = PropValue::handler(|| {});
		assert!(handler.is_skippable_attr());
		assert!(handler.to_text().is_none());
		assert_eq!(format!("{handler:?}"), "Handler(<closure>)");
	}

	#[test]
	fn test_handler_equality_is_identity() {
		let a = PropValue::handler(|| {});
		let b = a.clone();
		let c = PropValue::handler(|| {});
		assert_eq!(a, b);
		assert_ne!(a, c);
	}

	#[test]
	fn test_numeric_cross_representation_equality() {
		assert_eq!(PropValue::Int(1), PropValue::Float(1.0));
		assert_ne!(PropValue::Int(1), PropValue::Float(1.5));
	}

	#[test]
	fn test_to_text_forms() {
		assert_eq!(PropValue::Int(0).to_text().unwrap(), "0");
		assert_eq!(PropValue::Float(1.5).to_text().unwrap(), "1.5");
		assert_eq!(PropValue::Bool(true).to_text().unwrap(), "true");
		assert!(PropValue::Null.to_text().is_none());
	}

	#[test]
	fn test_from_json_scalars() {
		assert_eq!(PropValue::from(serde_json::json!(null)), PropValue::Null);
		assert_eq!(PropValue::from(serde_json::json!(true)), PropValue::Bool(true));
		assert_eq!(PropValue::from(serde_json::json!(3)), PropValue::Int(3));
		assert_eq!(PropValue::from(serde_json::json!(2.5)), PropValue::Float(2.5));
		assert_eq!(PropValue::from(serde_json::json!("x")), PropValue::from("x"));
		assert_eq!(PropValue::from(serde_json::json!([1, 2])), PropValue::Null);
	}

	#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
	struct LinkProps {
		href: String,
		target: Option<String>,
		tabindex: i64,
	}

	#[test]
	fn test_from_serialize_round_trip() {
		let typed = LinkProps {
			href: "/docs".to_string(),
			target: None,
			tabindex: 0,
		};
		let props = Props::from_serialize(&typed).unwrap();
		assert_eq!(props.get("href"), Some(&PropValue::from("/docs")));
		assert_eq!(props.get("target"), Some(&PropValue::Null));

		let back: LinkProps = props.to_typed().unwrap();
		assert_eq!(back, typed);
	}

	#[test]
	fn test_from_serialize_rejects_non_objects() {
		let err = Props::from_serialize(&42).unwrap_err();
		assert!(matches!(err, PropsError::NotAnObject("a number")));
	}

	#[test]
	fn test_to_typed_skips_handlers_and_nodes() {
		#[derive(Debug, serde::Deserialize)]
		struct Shape {
			label: String,
		}
		let mut props = Props::new().with("label", "ok");
		props.set("onclick", PropValue::handler(|| {}));
		props.set(CHILDREN, PropValue::node("child"));
		let shape: Shape = props.to_typed().unwrap();
		assert_eq!(shape.label, "ok");
	}

	#[test]
	fn test_style_map_set_replaces_in_place() {
		let style = StyleMap::new().set("color", "red").set("top", 1).set("color", "blue");
		let entries: Vec<(&str, &PropValue)> = style.iter().collect();
		assert_eq!(entries.len(), 2);
		assert_eq!(entries[0], ("color", &PropValue::from("blue")));
	}
}
