#![forbid(unsafe_code)]

//! Minimal HTML-like markup writer.
//!
//! Elements are opened and closed explicitly; text and attribute values
//! are escaped. Attribute order is the order given, so identical calls
//! always produce identical bytes.

/// Escape text or an attribute value.
#[must_use]
pub fn escape(value: &str) -> String {
    v_htmlescape::escape(value).to_string()
}

/// Append-only markup buffer.
#[derive(Debug, Default)]
pub struct Markup {
    out: String,
    open: Vec<&'static str>,
    root_attr: Option<(&'static str, &'static str)>,
}

impl Markup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp an extra attribute on the first element written.
    #[must_use]
    pub fn with_root_attr(mut self, name: &'static str, value: &'static str) -> Self {
        self.root_attr = Some((name, value));
        self
    }

    /// Open `<tag attrs...>`.
    pub fn open(&mut self, tag: &'static str, attrs: &[(&str, &str)]) {
        self.start_tag(tag, attrs);
        self.out.push('>');
        self.open.push(tag);
    }

    /// Write a self-contained element with text content.
    pub fn element(&mut self, tag: &'static str, attrs: &[(&str, &str)], text: &str) {
        self.open(tag, attrs);
        self.text(text);
        self.close();
    }

    /// Close the innermost open element. Extra closes are ignored.
    pub fn close(&mut self) {
        if let Some(tag) = self.open.pop() {
            self.out.push_str("</");
            self.out.push_str(tag);
            self.out.push('>');
        }
    }

    pub fn text(&mut self, text: &str) {
        self.out.push_str(&escape(text));
    }

    /// Nesting depth of currently open elements.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Close anything still open and return the markup.
    #[must_use]
    pub fn finish(mut self) -> String {
        if !self.open.is_empty() {
            tracing::warn!(unclosed = self.open.len(), "markup finished with open elements");
        }
        while !self.open.is_empty() {
            self.close();
        }
        self.out
    }

    fn start_tag(&mut self, tag: &'static str, attrs: &[(&str, &str)]) {
        self.out.push('<');
        self.out.push_str(tag);
        if let Some((name, value)) = self.root_attr.take() {
            self.push_attr(name, value);
        }
        for (name, value) in attrs {
            self.push_attr(name, value);
        }
    }

    fn push_attr(&mut self, name: &str, value: &str) {
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        self.out.push_str(&escape(value));
        self.out.push('"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_elements() {
        let mut m = Markup::new();
        m.open("div", &[("id", "a")]);
        m.element("span", &[], "hi");
        m.close();
        assert_eq!(m.finish(), r#"<div id="a"><span>hi</span></div>"#);
    }

    #[test]
    fn escapes_text_and_attributes() {
        let mut m = Markup::new();
        m.element("p", &[("title", "\"x\" & y")], "<b>");
        let out = m.finish();
        assert!(!out.contains("<b>"));
        assert!(out.contains("&lt;b&gt;"));
        assert!(out.contains("&amp;"));
    }

    #[test]
    fn finish_closes_open_elements() {
        let mut m = Markup::new();
        m.open("ul", &[]);
        m.open("li", &[]);
        assert_eq!(m.depth(), 2);
        assert_eq!(m.finish(), "<ul><li></li></ul>");
    }

    #[test]
    fn root_attr_only_on_first_element() {
        let mut m = Markup::new().with_root_attr("data-fdnd-root", "");
        m.open("div", &[]);
        m.element("span", &[], "");
        let out = m.finish();
        assert_eq!(out, r#"<div data-fdnd-root=""><span></span></div>"#);
    }

    #[test]
    fn extra_close_is_ignored() {
        let mut m = Markup::new();
        m.close();
        assert_eq!(m.finish(), "");
    }
}
