// Tiny HTML builder. Tag and attribute names are static; every dynamic value
// goes through `escape_html` when the tree is written out.
use std::fmt::{self, Write};

/// Escape the five characters that can break out of text or attribute context
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Elements that never have children or a closing tag
const VOID_TAGS: &[&str] = &["img", "input", "meta", "link", "br", "hr"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    classes: Vec<String>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Add a class only when `on` is true
    pub fn class_if(self, class: impl Into<String>, on: bool) -> Self {
        if on {
            self.class(class)
        } else {
            self
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn children<I: IntoIterator<Item = Element>>(mut self, children: I) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn is_void(&self) -> bool {
        VOID_TAGS.contains(&self.tag)
    }

    fn write_to(&self, out: &mut impl Write) -> fmt::Result {
        write!(out, "<{}", self.tag)?;
        if !self.classes.is_empty() {
            write!(out, " class=\"{}\"", escape_html(&self.classes.join(" ")))?;
        }
        for (name, value) in &self.attrs {
            write!(out, " {}=\"{}\"", name, escape_html(value))?;
        }
        out.write_char('>')?;

        if self.is_void() {
            return Ok(());
        }

        for child in &self.children {
            match child {
                Node::Element(e) => e.write_to(out)?,
                Node::Text(t) => out.write_str(&escape_html(t))?,
            }
        }
        write!(out, "</{}>", self.tag)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}
