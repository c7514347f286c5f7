//! Escaping and formatting utilities.
//!
//! Everything here is pure and total: the entity encoder, the
//! unsafe-name filter, the void-element set, and the style-object
//! serializer. The renderer calls these on every text node and
//! attribute; nothing here allocates unless the input requires it.

use std::borrow::Cow;

use crate::props::{PropValue, StyleMap};

/// Escapes markup-significant characters in text content and attribute values.
///
/// This function replaces the following characters:
/// - `&` → `&amp;`
/// - `<` → `&lt;`
/// - `>` → `&gt;`
/// - `"` → `&quot;`
/// - `'` → `&#x27;`
///
/// Returns a borrowed reference if no escaping is needed,
/// or an owned string if any characters were escaped.
pub fn encode_entities(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}

/// Tags that self-close in the output and never receive a body or a
/// closing tag, even when children or raw body content were supplied.
pub const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
	"source", "track", "wbr",
];

/// Returns whether `tag` is a void element.
pub fn is_void_element(tag: &str) -> bool {
	VOID_ELEMENTS.contains(&tag)
}

/// Returns whether a tag or attribute name is unsafe to emit.
///
/// A name is unsafe when it contains whitespace, `\`, `/`, `=`, a quote
/// character, NUL, `<`, or `>`. The renderer suppresses unsafe names
/// silently; they are filtered, not validated.
pub fn is_unsafe_name(name: &str) -> bool {
	name.chars()
		.any(|c| c.is_whitespace() || matches!(c, '\\' | '/' | '=' | '\'' | '"' | '\0' | '<' | '>'))
}

/// Style properties whose numeric values carry no implicit `px` unit.
const UNITLESS_PROPERTIES: &[&str] = &[
	"animation-iteration-count",
	"column-count",
	"columns",
	"flex",
	"flex-grow",
	"flex-shrink",
	"font-weight",
	"grid-column",
	"grid-row",
	"line-clamp",
	"line-height",
	"opacity",
	"order",
	"orphans",
	"tab-size",
	"widows",
	"z-index",
	"zoom",
];

/// Rewrites a camelCase style property name to kebab-case.
///
/// Names starting with `-` (custom properties) pass through unchanged.
fn css_name(name: &str) -> Cow<'_, str> {
	if name.starts_with('-') || !name.bytes().any(|b| b.is_ascii_uppercase()) {
		return Cow::Borrowed(name);
	}
	let mut kebab = String::with_capacity(name.len() + 2);
	for c in name.chars() {
		if c.is_ascii_uppercase() {
			kebab.push('-');
			kebab.push(c.to_ascii_lowercase());
		} else {
			kebab.push(c);
		}
	}
	Cow::Owned(kebab)
}

/// Serializes a style mapping into a single CSS declaration string.
///
/// Declarations appear in mapping order as `name: value;`, separated by
/// a single space, with no trailing space. `Null` and empty-string
/// values are skipped. Numeric values get a `px` suffix unless the
/// property is unitless; the literal `0` still gets the suffix when the
/// property is dimensional.
pub fn style_to_css(style: &StyleMap) -> String {
	let mut css = String::new();
	for (name, value) in style.iter() {
		let (text, numeric) = match value {
			PropValue::Str(s) if !s.is_empty() => (s.to_string(), false),
			PropValue::Int(n) => (n.to_string(), true),
			PropValue::Float(x) => (x.to_string(), true),
			_ => continue,
		};
		let name = css_name(name);
		if !css.is_empty() {
			css.push(' ');
		}
		css.push_str(&name);
		css.push_str(": ");
		css.push_str(&text);
		if numeric && !UNITLESS_PROPERTIES.contains(&name.as_ref()) {
			css.push_str("px");
		}
		css.push(';');
	}
	css
}
