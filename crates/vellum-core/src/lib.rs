//! Core data model for vellum.
//!
//! This crate provides the types for representing renderable content:
//! the closed [`vnode::VNode`] enum, the ordered [`props::Props`]
//! mapping, the component abstraction with its capability-flagged
//! lifecycle, and the ambient [`context::RenderContext`]. It also holds
//! the pure escaping and style-formatting utilities the renderer
//! applies to output.
//!
//! The renderer itself lives in `vellum-ssr`; this crate has no output
//! concern beyond the leaf utilities.

pub mod component;
pub mod context;
pub mod props;
pub mod util;
pub mod vnode;

pub use component::{
	Component, ComponentDef, ComponentInstance, FunctionComponent, HookSet, State,
};
pub use context::{ContextSlot, RenderContext};
pub use props::{
	CHILDREN, DANGEROUS_INNER_HTML, EventHandler, KEY, PropValue, Props, PropsError, REF, StyleMap,
};
pub use util::{VOID_ELEMENTS, encode_entities, is_unsafe_name, is_void_element, style_to_css};
pub use vnode::{ComponentNode, Element, IntoVNode, VNode};
