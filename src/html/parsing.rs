use tracing::{debug, span, trace, Level};

use super::dom::*;
use crate::cursor::Cursor;
use crate::error::ParseError;

/// Parse an HTML document and return its root.
///
/// A single top-level node is returned as is; anything else (including no nodes at all) is
/// wrapped in an `html` element.
pub fn parse_html(source: &str) -> Result<DOMNode, ParseError> {
    let span = span!(Level::DEBUG, "Parsing HTML", bytes = source.len());
    let _enter = span.enter();

    let mut parser = HtmlParser::new(source);
    let mut nodes = parser.parse_nodes()?;
    // `parse_nodes` only stops early on a closing tag nobody opened
    if !parser.cursor.at_end() {
        return Err(parser.malformed("end of input"));
    }
    if nodes.len() == 1 {
        Ok(nodes.remove(0))
    } else {
        debug!(count = nodes.len(), "Wrapping top-level nodes in <html>");
        Ok(DOMNode::element("html", DOMAttributes::empty(), nodes))
    }
}

struct HtmlParser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> HtmlParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Error for a failed expectation at the current position
    fn malformed(&self, expected: impl Into<String>) -> ParseError {
        ParseError::MalformedMarkup {
            position: self.cursor.position(),
            expected: expected.into(),
            found: self.cursor.peek().ok().map(String::from),
        }
    }

    /// Consume `expected` or fail without moving
    fn expect_char(&mut self, expected: char) -> Result<(), ParseError> {
        match self.cursor.peek() {
            Ok(c) if c == expected => {
                self.cursor.advance()?;
                Ok(())
            }
            _ => Err(self.malformed(format!("`{}`", expected))),
        }
    }

    /// Parse a sequence of sibling nodes, stopping at the end of input or at a closing tag
    fn parse_nodes(&mut self) -> Result<Vec<DOMNode>, ParseError> {
        let mut nodes = Vec::new();
        loop {
            self.cursor.skip_spaces();
            if self.cursor.at_end() || self.cursor.starts_with("</") {
                break;
            }
            nodes.push(self.parse_node()?);
        }
        Ok(nodes)
    }

    fn parse_node(&mut self) -> Result<DOMNode, ParseError> {
        if self.cursor.peek()? == '<' {
            self.parse_element()
        } else {
            Ok(self.parse_text())
        }
    }

    /// Everything up to the next `<`
    fn parse_text(&mut self) -> DOMNode {
        let text = self.cursor.consume_while(|c| c != '<');
        trace!(len = text.len(), "Text node");
        DOMNode::text(text)
    }

    /// Attempt to parse a tag or attribute name
    fn parse_tag_name(&mut self) -> &'a str {
        self.cursor.consume_while(|c| c.is_ascii_alphanumeric())
    }

    /// Parse a complete element: opening tag, contents and closing tag
    fn parse_element(&mut self) -> Result<DOMNode, ParseError> {
        let element = self.parse_open_tag()?;
        let children = self.parse_nodes()?;
        self.parse_close_tag(&element.tag_name)?;
        Ok(DOMElement {
            children,
            ..element
        }
        .into())
    }

    /// Parse a tag in the form `<name attr="value" ...>`
    fn parse_open_tag(&mut self) -> Result<DOMElement, ParseError> {
        self.expect_char('<')?;
        let name = self.parse_tag_name();
        let attributes = self.parse_attributes()?;
        self.expect_char('>')?;
        trace!(tag = name, attributes = attributes.len(), "Opened element");
        Ok(DOMElement::new(name, Some(attributes), vec![]))
    }

    /// Parse a tag in the form `</name>`, which must close `name`
    fn parse_close_tag(&mut self, name: &str) -> Result<(), ParseError> {
        let expected = || format!("closing tag `</{}>`", name);
        if !self.cursor.starts_with("</") {
            return Err(self.malformed(expected()));
        }
        self.expect_char('<')?;
        self.expect_char('/')?;
        let start = self.cursor.position();
        let close = self.parse_tag_name();
        if close != name {
            return Err(ParseError::MalformedMarkup {
                position: start,
                expected: expected(),
                found: Some(format!("</{}", close)),
            });
        }
        self.expect_char('>')?;
        trace!(tag = name, "Closed element");
        Ok(())
    }

    /// Parse `name="value"` pairs separated by spaces, up to the `>` of the opening tag
    fn parse_attributes(&mut self) -> Result<DOMAttributes, ParseError> {
        let mut attributes = DOMAttributes::empty();
        loop {
            self.cursor.skip_spaces();
            match self.cursor.peek() {
                Ok('>') => break,
                Ok(_) => {
                    let (name, value) = self.parse_attr()?;
                    attributes.insert(name, value);
                }
                Err(_) => return Err(self.malformed("`>`")),
            }
        }
        Ok(attributes)
    }

    fn parse_attr(&mut self) -> Result<(&'a str, &'a str), ParseError> {
        let name = self.parse_tag_name();
        self.expect_char('=')?;
        let value = self.parse_attr_value()?;
        Ok((name, value))
    }

    /// A value in single or double quotes, closed by the same quote it opened with
    fn parse_attr_value(&mut self) -> Result<&'a str, ParseError> {
        let quote = match self.cursor.peek() {
            Ok(q @ ('"' | '\'')) => q,
            _ => return Err(self.malformed("`\"` or `'`")),
        };
        self.cursor.advance()?;
        let value = self.cursor.consume_while(|c| c != quote);
        self.expect_char(quote)?;
        Ok(value)
    }
}

#[cfg(test)]
use std::collections::HashMap;

#[cfg(test)]
#[test]
fn test_node_parse() {
    let data = r#"<html><div class="nothing"><h1></h1></div></html>"#;
    let target = DOMNode::element(
        "html",
        DOMAttributes::empty(),
        vec![DOMNode::element(
            "div",
            DOMAttributes(HashMap::from([(
                "class".to_string(),
                "nothing".to_string(),
            )])),
            vec![DOMNode::element("h1", DOMAttributes::empty(), vec![])],
        )],
    );
    assert_eq!(parse_html(data).unwrap(), target);

    let data = r#"<html><h1>Hello, world</h1></html>"#;
    let target = DOMNode::element(
        "html",
        DOMAttributes::empty(),
        vec![DOMNode::element(
            "h1",
            DOMAttributes::empty(),
            vec![DOMNode::text("Hello, world")],
        )],
    );
    assert_eq!(parse_html(data).unwrap(), target);
}

#[cfg(test)]
#[test]
fn test_parse_malformed() {
    let data = r#"<html></closing><opening></html>"#;
    assert!(matches!(
        parse_html(data),
        Err(ParseError::MalformedMarkup { position: 8, .. })
    ));
    let data = r#"<---></--->"#;
    assert!(parse_html(data).is_err());
    let data = r#"<div>"#;
    assert_eq!(
        parse_html(data),
        Err(ParseError::MalformedMarkup {
            position: 5,
            expected: "closing tag `</div>`".to_string(),
            found: None,
        })
    );
}

#[cfg(test)]
#[test]
fn test_tag_parse() {
    let mut parser = HtmlParser::new(r#"<div>"#);
    let target = DOMElement::new("div", None, vec![]);
    assert_eq!(parser.parse_open_tag().unwrap(), target);
    assert!(parser.cursor.at_end());

    let mut parser = HtmlParser::new(r#"<div class="nothing">"#);
    let target = DOMElement::new("div", Some(crate::attributes!(class => "nothing")), vec![]);
    assert_eq!(parser.parse_open_tag().unwrap(), target);

    let mut parser =
        HtmlParser::new(r#"<div attr1="" attr2="two" attr3='three' attr4="number 'four'">"#);
    let target = DOMElement::new(
        "div",
        Some(crate::attributes!(
            attr1 => "",
            attr2 => "two",
            attr3 => "three",
            attr4 => "number 'four'",
        )),
        vec![],
    );
    assert_eq!(parser.parse_open_tag().unwrap(), target);
}

#[cfg(test)]
#[test]
fn test_attr_value_quotes() {
    let mut parser = HtmlParser::new(r#""it's""#);
    assert_eq!(parser.parse_attr_value(), Ok("it's"));

    let mut parser = HtmlParser::new(r#"'oops""#);
    assert_eq!(
        parser.parse_attr_value(),
        Err(ParseError::MalformedMarkup {
            position: 6,
            expected: "`'`".to_string(),
            found: None,
        })
    );

    let mut parser = HtmlParser::new("bare");
    assert!(matches!(
        parser.parse_attr_value(),
        Err(ParseError::MalformedMarkup { position: 0, .. })
    ));
}
