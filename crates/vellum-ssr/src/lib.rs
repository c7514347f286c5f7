//! The vellum renderer: converts a virtual-node tree into an HTML
//! string in one synchronous, depth-first pass.
//!
//! The entry points are the free [`render_to_string`] function and the
//! configured [`Renderer`], which adds options, an optional
//! [`RenderObserver`], and full-document wrapping. Rendering is a pure
//! function of the input tree apart from side effects performed by
//! component code itself; panics from component code unwind out of the
//! render call with no partial output.
//!
//! ## Example
//!
//! ```ignore
//! use vellum_core::vnode::{Element, IntoVNode};
//! use vellum_ssr::render_to_string;
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

pub mod document;
pub mod observer;
pub mod render;

pub use observer::RenderObserver;
pub use render::{RenderOptions, Renderer, SelectCursor, render_to_string};
