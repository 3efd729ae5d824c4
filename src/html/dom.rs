use std::collections::{HashMap, HashSet};
use std::fmt::{self, Display};

/// A node of the document tree. Text nodes are leaves; only elements own children.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DOMNode {
    Element(DOMElement),
    Text(String),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DOMElement {
    pub tag_name: String,
    pub attributes: DOMAttributes,
    pub children: Vec<DOMNode>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct DOMAttributes(pub HashMap<String, String>);

impl DOMAttributes {
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    pub fn get(&self, name: &str) -> Option<&String> {
        self.0.get(name)
    }

    /// Set `name` to `value`, replacing any earlier value for the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Build a [`DOMAttributes`] from `name => value` pairs
///
/// ```
/// use parsley::attributes;
/// let attrs = attributes!(lang => "en", id => "main");
/// assert_eq!(attrs.get("lang").map(String::as_str), Some("en"));
/// ```
#[macro_export]
macro_rules! attributes {
    ($($name:ident => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut attrs = $crate::html::DOMAttributes::empty();
        $(attrs.insert(stringify!($name), $value);)*
        attrs
    }};
}

impl DOMNode {
    pub fn text(data: impl Into<String>) -> Self {
        DOMNode::Text(data.into())
    }

    pub fn element(name: impl Display, attributes: DOMAttributes, children: Vec<DOMNode>) -> Self {
        DOMNode::Element(DOMElement::new(name, Some(attributes), children))
    }

    pub fn as_element(&self) -> Option<&DOMElement> {
        match self {
            DOMNode::Element(el) => Some(el),
            DOMNode::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DOMNode::Text(t) => Some(t.as_str()),
            DOMNode::Element(_) => None,
        }
    }

    /// Children of an element; always empty for text
    pub fn children(&self) -> &[DOMNode] {
        match self {
            DOMNode::Element(el) => &el.children,
            DOMNode::Text(_) => &[],
        }
    }

    /// Every element in the subtree rooted here, in document order
    pub fn elements(&self) -> Vec<&DOMElement> {
        let mut found = Vec::new();
        self.collect_elements(&mut found);
        found
    }

    fn collect_elements<'a>(&'a self, found: &mut Vec<&'a DOMElement>) {
        if let DOMNode::Element(el) = self {
            found.push(el);
            el.children.iter().for_each(|c| c.collect_elements(found));
        }
    }
}

impl DOMElement {
    pub fn new(name: impl Display, attributes: Option<DOMAttributes>, children: Vec<DOMNode>) -> Self {
        Self {
            tag_name: name.to_string(),
            attributes: attributes.unwrap_or_default(),
            children,
        }
    }

    pub fn get_attribute(&self, name: &str) -> Option<&String> {
        self.attributes.get(name)
    }

    pub fn id(&self) -> Option<&String> {
        self.get_attribute("id")
    }

    /// The space separated entries of the `class` attribute
    pub fn classes(&self) -> HashSet<&str> {
        match self.get_attribute("class") {
            Some(list) => list.split(' ').filter(|c| !c.is_empty()).collect(),
            None => HashSet::new(),
        }
    }
}

impl From<DOMElement> for DOMNode {
    fn from(el: DOMElement) -> Self {
        DOMNode::Element(el)
    }
}

impl From<&str> for DOMNode {
    fn from(s: &str) -> Self {
        DOMNode::text(s)
    }
}

/// Writes the node back out as markup. Attributes are sorted by name and double quoted.
impl Display for DOMNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DOMNode::Text(t) => f.write_str(t),
            DOMNode::Element(el) => Display::fmt(el, f),
        }
    }
}

impl Display for DOMElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag_name)?;
        let mut attrs: Vec<_> = self.attributes.0.iter().collect();
        attrs.sort();
        for (name, value) in attrs {
            write!(f, " {}=\"{}\"", name, value)?;
        }
        f.write_str(">")?;
        for child in &self.children {
            Display::fmt(child, f)?;
        }
        write!(f, "</{}>", self.tag_name)
    }
}

#[cfg(test)]
#[test]
fn test_element_queries() {
    let el = DOMElement::new(
        "div",
        Some(attributes!(id => "main", class => "card  wide")),
        vec![],
    );
    assert_eq!(el.id().map(String::as_str), Some("main"));
    assert_eq!(el.classes(), HashSet::from(["card", "wide"]));

    let bare = DOMElement::new("p", None, vec![]);
    assert_eq!(bare.id(), None);
    assert!(bare.classes().is_empty());
}

#[cfg(test)]
#[test]
fn test_serialize() {
    let node = DOMNode::element(
        "p",
        attributes!(title => "x", class => "a b"),
        vec!["Hi ".into(), DOMElement::new("b", None, vec!["there".into()]).into()],
    );
    assert_eq!(
        node.to_string(),
        r#"<p class="a b" title="x">Hi <b>there</b></p>"#
    );
}

#[cfg(test)]
#[test]
fn test_elements_in_document_order() {
    let node = DOMNode::element(
        "html",
        DOMAttributes::empty(),
        vec![
            DOMElement::new("head", None, vec![]).into(),
            DOMElement::new("body", None, vec![DOMElement::new("p", None, vec!["text".into()]).into()])
                .into(),
        ],
    );
    let names: Vec<&str> = node.elements().iter().map(|e| e.tag_name.as_str()).collect();
    assert_eq!(names, ["html", "head", "body", "p"]);
    assert!(node.children()[0].children().is_empty());
    assert_eq!(node.children()[1].children()[0].children()[0].as_text(), Some("text"));
}
