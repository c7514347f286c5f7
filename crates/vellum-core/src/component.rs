//! The component abstraction: plain function components,
//! capability-bearing components, and the per-render instance.
//!
//! A component is either one callable (no lifecycle, no state) or a
//! value implementing [`Component`], whose one required capability is
//! `render` and whose optional hooks are declared through the
//! [`HookSet`] discriminant. "Has this hook" is a flag check, never
//! reflection: a hook method runs only when its flag is declared, so an
//! implementation that overrides a hook without declaring it stays
//! inert.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::context::RenderContext;
use crate::props::{PropValue, Props};
use crate::vnode::VNode;

bitflags! {
	/// Optional lifecycle capabilities a stateful component declares.
	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	pub struct HookSet: u8 {
		/// `derive_state` runs before render and its result is
		/// shallow-merged over current state. Takes precedence over
		/// `WILL_MOUNT`: exactly one pre-render hook ever runs.
		const DERIVE_STATE = 1 << 0;
		/// `will_mount` runs before render when `DERIVE_STATE` is
		/// absent; it may queue a pending state update on the instance.
		const WILL_MOUNT = 1 << 1;
		/// `child_context` extends the ambient context for the subtree.
		const CHILD_CONTEXT = 1 << 2;
	}
}

/// Shallow per-instance state: a string-keyed value mapping.
///
/// Merges are shallow: an incoming entry replaces the whole value under
/// its key, nested structures are never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State(HashMap<Cow<'static, str>, PropValue>);

impl State {
	/// Creates empty state.
	pub fn new() -> Self {
		Self(HashMap::new())
	}

	/// Chainable insert, for literal construction.
	pub fn with(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<PropValue>) -> Self {
		self.set(key, value);
		self
	}

	/// Sets an entry, replacing any previous value under the key.
	pub fn set(&mut self, key: impl Into<Cow<'static, str>>, value: impl Into<PropValue>) {
		self.0.insert(key.into(), value.into());
	}

	/// Looks up an entry by key.
	pub fn get(&self, key: &str) -> Option<&PropValue> {
		self.0.get(key)
	}

	/// Shallow-merges `update` over this state.
	pub fn merge(&mut self, update: State) {
		self.0.extend(update.0);
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// A function component: one plain callable from (properties, effective
/// context) to a subtree.
pub type FunctionComponent = dyn Fn(&Props, &RenderContext) -> VNode + Send + Sync;

/// A capability-bearing component.
///
/// `render` is the one required capability. The optional hooks have
/// inert defaults and run only when declared through [`Self::hooks`].
pub trait Component: Send + Sync {
	/// Produces the subtree for one render pass.
	fn render(&self, props: &Props, state: &State, context: &RenderContext) -> VNode;

	/// Declares which optional hooks this component implements.
	fn hooks(&self) -> HookSet {
		HookSet::empty()
	}

	/// Supplies the state an instance starts from. Defaults to empty.
	fn initial_state(&self, _props: &Props) -> State {
		State::new()
	}

	/// Derives a state update from properties, shallow-merged over
	/// current state. Runs only when [`HookSet::DERIVE_STATE`] is
	/// declared.
	fn derive_state(&self, _props: &Props, _state: &State) -> State {
		State::new()
	}

	/// Pre-render hook; may queue a pending state update through the
	/// instance. Runs only when [`HookSet::WILL_MOUNT`] is declared and
	/// `DERIVE_STATE` is not.
	fn will_mount(&self, _instance: &mut ComponentInstance<'_>) {}

	/// Context entries merged over a copy of the ambient context for the
	/// subtree render. Runs only when [`HookSet::CHILD_CONTEXT`] is
	/// declared.
	fn child_context(&self, _instance: &ComponentInstance<'_>) -> RenderContext {
		RenderContext::new()
	}
}

/// The definition a component node points at.
///
/// Definitions are shared (`Arc`) so a tree can be built once and
/// rendered from any thread.
#[derive(Clone)]
pub enum ComponentDef {
	/// Invoked once per node with (properties, effective context); no
	/// lifecycle, no state.
	Function(Arc<FunctionComponent>),
	/// Instantiated once per node; lifecycle per [`Component`].
	Stateful(Arc<dyn Component>),
}

impl fmt::Debug for ComponentDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ComponentDef::Function(_) => f.write_str("Function(<fn>)"),
			ComponentDef::Stateful(_) => f.write_str("Stateful(<component>)"),
		}
	}
}

/// Ephemeral bookkeeping for one component render.
///
/// Created fresh per component node and discarded once the node's
/// subtree has been rendered: never reused, never persisted, never
/// reconciled with a prior instance. Holds the effective properties and
/// context plus current/pending state.
#[derive(Debug)]
pub struct ComponentInstance<'a> {
	props: &'a Props,
	context: RenderContext,
	state: State,
	pending_state: Option<State>,
}

impl<'a> ComponentInstance<'a> {
	/// Builds an instance from effective properties, effective context,
	/// and initial state.
	pub fn new(props: &'a Props, context: RenderContext, state: State) -> Self {
		Self {
			props,
			context,
			state,
			pending_state: None,
		}
	}

	/// The effective properties for this render.
	pub fn props(&self) -> &Props {
		self.props
	}

	/// The effective context for this render.
	pub fn context(&self) -> &RenderContext {
		&self.context
	}

	/// The current state.
	pub fn state(&self) -> &State {
		&self.state
	}

	/// Shallow-merges an update over current state immediately.
	pub fn merge_state(&mut self, update: State) {
		self.state.merge(update);
	}

	/// Queues a state update to apply before render. The queued state
	/// replaces (does not merge with) current state; a later queue call
	/// replaces an earlier one.
	pub fn queue_state(&mut self, next: State) {
		self.pending_state = Some(next);
	}

	/// Applies a queued update, if any, replacing current state.
	pub fn apply_pending(&mut self) {
		if let Some(next) = self.pending_state.take() {
			self.state = next;
		}
	}
}
