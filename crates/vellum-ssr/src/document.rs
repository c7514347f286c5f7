//! Full-document wrapping around rendered markup.

use vellum_core::vnode::VNode;

use crate::render::Renderer;

impl Renderer {
	/// Renders a root value and wraps it in a minimal HTML5 document
	/// skeleton: doctype, `html` with the configured `lang`, a `head`
	/// with charset and viewport metas, and a `body` holding the
	/// rendered markup.
	///
	/// The skeleton's newlines are its own; the rendered content itself
	/// contains newlines only if source content does.
	pub fn render_document(&self, node: &VNode) -> String {
		let content = self.render(node);
		let mut html = String::with_capacity(content.len() + 256);

		html.push_str("<!DOCTYPE html>\n");
		html.push_str(&format!("<html lang=\"{}\">\n", self.options().lang));

		html.push_str("<head>\n");
		html.push_str("<meta charset=\"UTF-8\">\n");
		html.push_str(
			"<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
		);
		html.push_str("</head>\n");

		html.push_str("<body>\n");
		html.push_str(&content);
		html.push_str("\n</body>\n");
		html.push_str("</html>");

		html
	}
}

#[cfg(test)]
mod tests {
	use vellum_core::vnode::{Element, IntoVNode};

	use crate::render::{RenderOptions, Renderer};

	#[test]
	fn test_document_skeleton() {
		let node = Element::new("h1").child("Hi").into_vnode();
		let html = Renderer::new().render_document(&node);

		assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
		assert!(html.contains("<meta charset=\"UTF-8\">"));
		assert!(html.contains("<body>\n<h1>Hi</h1>\n</body>"));
		assert!(html.ends_with("</html>"));
	}

	#[test]
	fn test_document_lang_option() {
		let node = Element::new("p").child("Bonjour").into_vnode();
		let html = Renderer::with_options(RenderOptions::new().lang("fr")).render_document(&node);
		assert!(html.contains("<html lang=\"fr\">"));
	}
}
