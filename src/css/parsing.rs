use tracing::{debug, span, trace, Level};

use super::{sort_by_specificity, Declaration, Rule, SimpleSelector, SpecificityOrder};
use crate::cursor::Cursor;
use crate::error::ParseError;

/// Parse a comma separated list of simple selectors, ordered ascending by specificity sum.
///
/// The list ends at the end of input or before a `{`, which is left unconsumed.
pub fn parse_css_selectors(source: &str) -> Result<Vec<SimpleSelector>, ParseError> {
    let span = span!(Level::DEBUG, "Parsing selectors", source);
    let _enter = span.enter();
    SelectorParser::new(source).parse_selectors()
}

/// Parse the selector list of a rule. Declarations are not read, so the rule never has any.
pub fn parse_rule(source: &str) -> Result<Rule, ParseError> {
    let span = span!(Level::DEBUG, "Parsing rule", source);
    let _enter = span.enter();
    SelectorParser::new(source).parse_rule()
}

fn valid_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

struct SelectorParser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> SelectorParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    fn unexpected(&self) -> ParseError {
        ParseError::UnexpectedCharacter {
            position: self.cursor.position(),
            found: self.cursor.peek().ok(),
        }
    }

    /// A run of ASCII letters and digits, possibly empty
    fn parse_identifier(&mut self) -> &'a str {
        self.cursor.consume_while(valid_identifier_char)
    }

    /// Parse one simple selector, e.g. `div#main.card.wide`.
    ///
    /// Stops at the first character that cannot continue the selector, so it may return an
    /// empty selector without consuming anything.
    fn parse_simple_selector(&mut self) -> Result<SimpleSelector, ParseError> {
        let mut selector = SimpleSelector::default();
        while !self.cursor.at_end() {
            match self.cursor.peek()? {
                '#' => {
                    self.cursor.advance()?;
                    selector.id = self.parse_identifier().to_string();
                }
                '.' => {
                    self.cursor.advance()?;
                    let class = self.parse_identifier();
                    selector.class_arr.push(class.to_string());
                }
                // Universal selector
                '*' => {
                    self.cursor.advance()?;
                }
                c if valid_identifier_char(c) => {
                    selector.tag_name = self.parse_identifier().to_string();
                    self.cursor.skip_spaces();
                }
                _ => break,
            }
        }
        trace!(%selector, "Parsed simple selector");
        Ok(selector)
    }

    fn parse_selectors(&mut self) -> Result<Vec<SimpleSelector>, ParseError> {
        let mut selectors = Vec::new();
        loop {
            selectors.push(self.parse_simple_selector()?);
            self.cursor.skip_spaces();
            match self.cursor.peek() {
                Ok(',') => {
                    self.cursor.advance()?;
                    self.cursor.skip_spaces();
                }
                // End of input or the start of a declaration block
                Ok('{') | Err(_) => break,
                Ok(_) => return Err(self.unexpected()),
            }
        }
        sort_by_specificity(&mut selectors, SpecificityOrder::Sum);
        debug!(count = selectors.len(), "Parsed selector list");
        Ok(selectors)
    }

    // Declaration blocks are not parsed
    fn parse_declarations(&mut self) -> Vec<Declaration> {
        vec![]
    }

    fn parse_rule(&mut self) -> Result<Rule, ParseError> {
        Ok(Rule {
            selectors: self.parse_selectors()?,
            declarations: self.parse_declarations(),
        })
    }
}

#[cfg(test)]
#[test]
fn test_parse_selector() {
    let mut parser = SelectorParser::new("*");
    assert_eq!(parser.parse_simple_selector(), Ok(SimpleSelector::default()));

    let mut parser = SelectorParser::new(".classname");
    assert_eq!(
        parser.parse_simple_selector(),
        Ok(SimpleSelector {
            class_arr: vec!["classname".to_string()],
            ..Default::default()
        })
    );

    let mut parser = SelectorParser::new("#idname");
    assert_eq!(
        parser.parse_simple_selector(),
        Ok(SimpleSelector {
            id: "idname".to_string(),
            ..Default::default()
        })
    );

    let mut parser = SelectorParser::new("h1 ");
    assert_eq!(
        parser.parse_simple_selector(),
        Ok(SimpleSelector {
            tag_name: "h1".to_string(),
            ..Default::default()
        })
    );
    assert!(parser.cursor.at_end());

    let mut parser = SelectorParser::new("div#main.a.a{");
    assert_eq!(
        parser.parse_simple_selector(),
        Ok(SimpleSelector {
            tag_name: "div".to_string(),
            id: "main".to_string(),
            class_arr: vec!["a".to_string(), "a".to_string()],
        })
    );
    assert_eq!(parser.cursor.peek(), Ok('{'));
}

#[cfg(test)]
#[test]
fn test_parse_selector_empty_parts() {
    let mut parser = SelectorParser::new("#{");
    assert_eq!(parser.parse_simple_selector(), Ok(SimpleSelector::default()));
    assert_eq!(parser.cursor.position(), 1);

    let mut parser = SelectorParser::new("div.,");
    assert_eq!(
        parser.parse_simple_selector(),
        Ok(SimpleSelector {
            tag_name: "div".to_string(),
            class_arr: vec!["".to_string()],
            ..Default::default()
        })
    );
    assert_eq!(parser.cursor.peek(), Ok(','));

    let mut parser = SelectorParser::new(", a");
    assert_eq!(parser.parse_simple_selector(), Ok(SimpleSelector::default()));
    assert_eq!(parser.cursor.position(), 0);
}

#[cfg(test)]
#[test]
fn test_parse_rule() {
    let rule = parse_rule("h2, h1 { color: black }").unwrap();
    let names: Vec<&str> = rule.selectors.iter().map(|s| s.tag_name.as_str()).collect();
    assert_eq!(names, ["h2", "h1"]);
    assert!(rule.declarations.is_empty());
}
