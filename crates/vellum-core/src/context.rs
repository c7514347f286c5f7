//! The ambient render context threaded down the tree.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::props::PropValue;

/// Ambient keyed mapping passed down the tree for implicit data passing
/// across intermediate components.
///
/// Forks are shallow copies: a component extending or narrowing the
/// context affects only its own subtree, never siblings or ancestors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext(HashMap<Cow<'static, str>, PropValue>);

impl RenderContext {
	/// Creates an empty context.
	pub fn new() -> Self {
		Self(HashMap::new())
	}

	/// Chainable insert, for literal construction.
	pub fn with(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<PropValue>) -> Self {
		self.insert(key, value);
		self
	}

	/// Inserts an entry, replacing any previous value under the key.
	pub fn insert(&mut self, key: impl Into<Cow<'static, str>>, value: impl Into<PropValue>) {
		self.0.insert(key.into(), value.into());
	}

	/// Looks up an entry by key.
	pub fn get(&self, key: &str) -> Option<&PropValue> {
		self.0.get(key)
	}

	/// Shallow-copies this context and merges `overlay` over the copy.
	///
	/// The receiver is untouched; the fork is visible only to whoever is
	/// handed the return value.
	pub fn fork_with(&self, overlay: RenderContext) -> RenderContext {
		let mut forked = self.clone();
		forked.0.extend(overlay.0);
		forked
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// A declared context key with a default value.
///
/// A component node naming a slot sees a single-entry effective context:
/// the slot key mapped to the ancestor-provided value if present, else
/// the slot default.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSlot {
	key: Cow<'static, str>,
	default: PropValue,
}

impl ContextSlot {
	/// Declares a slot under `key` with a fallback value.
	pub fn new(key: impl Into<Cow<'static, str>>, default: impl Into<PropValue>) -> Self {
		Self {
			key: key.into(),
			default: default.into(),
		}
	}

	/// The slot's context key.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// The value used when no ancestor provided one.
	pub fn default_value(&self) -> &PropValue {
		&self.default
	}

	/// Resolves the slot against an ambient context: the provided value
	/// if present, else the default.
	pub fn resolve(&self, context: &RenderContext) -> PropValue {
		context
			.get(&self.key)
			.cloned()
			.unwrap_or_else(|| self.default.clone())
	}

	/// Builds the single-entry effective context for a component naming
	/// this slot.
	pub fn narrowed(&self, context: &RenderContext) -> RenderContext {
		RenderContext::new().with(self.key.clone(), self.resolve(context))
	}
}
