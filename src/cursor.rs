use nom::bytes::complete::take_while;
use nom::IResult;

use crate::error::ParseError;

/// A read position over borrowed input, shared by the HTML and CSS parsers.
///
/// `position` is a byte offset that always sits on a char boundary and only ever moves forward.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// The part of the input not consumed yet
    pub fn rest(&self) -> &'a str {
        let input: &'a str = self.input;
        &input[self.position..]
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Read the current character without consuming it
    pub fn peek(&self) -> Result<char, ParseError> {
        self.rest().chars().next().ok_or(ParseError::OutOfBounds {
            position: self.position,
        })
    }

    /// Do the next characters start with `s`? Input shorter than `s` never matches.
    pub fn starts_with(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    /// Return the current character and move past it
    pub fn advance(&mut self) -> Result<char, ParseError> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Ok(c)
    }

    /// Consume the longest run of characters satisfying `test`, which may be empty
    pub fn consume_while<F>(&mut self, test: F) -> &'a str
    where
        F: Fn(char) -> bool,
    {
        let rest = self.rest();
        let res: IResult<&str, &str> = take_while(test)(rest);
        // `complete::take_while` accepts an empty run, so this never errors
        let taken = res.map(|(_, taken)| taken).unwrap_or("");
        self.position += taken.len();
        taken
    }

    /// Skip ASCII spaces. Tabs and newlines are left alone.
    pub fn skip_spaces(&mut self) {
        self.consume_while(|c| c == ' ');
    }
}

#[cfg(test)]
#[test]
fn test_peek_and_advance() {
    let mut cursor = Cursor::new("ab");
    assert_eq!(cursor.peek(), Ok('a'));
    assert_eq!(cursor.advance(), Ok('a'));
    assert_eq!(cursor.advance(), Ok('b'));
    assert!(cursor.at_end());
    assert_eq!(cursor.peek(), Err(ParseError::OutOfBounds { position: 2 }));
    assert_eq!(cursor.advance(), Err(ParseError::OutOfBounds { position: 2 }));
    assert_eq!(cursor.position(), 2);
}

#[cfg(test)]
#[test]
fn test_starts_with() {
    let mut cursor = Cursor::new("a</b>");
    assert!(!cursor.starts_with("</"));
    cursor.advance().unwrap();
    assert!(cursor.starts_with("</"));
    assert_eq!(cursor.position(), 1);
    assert!(!cursor.starts_with("</b>>"));
    assert!(cursor.starts_with(""));
}

#[cfg(test)]
#[test]
fn test_consume_while() {
    let mut cursor = Cursor::new("div42 rest");
    assert_eq!(cursor.consume_while(|c| c.is_ascii_alphanumeric()), "div42");
    assert_eq!(cursor.consume_while(|c| c.is_ascii_alphanumeric()), "");
    assert_eq!(cursor.position(), 5);
    assert_eq!(cursor.consume_while(|_| true), " rest");
    assert!(cursor.at_end());
    assert_eq!(cursor.consume_while(|_| true), "");
}

#[cfg(test)]
#[test]
fn test_skip_spaces_is_narrow() {
    let mut cursor = Cursor::new("   \tx");
    cursor.skip_spaces();
    assert_eq!(cursor.peek(), Ok('\t'));
    assert_eq!(cursor.position(), 3);
}

#[cfg(test)]
#[test]
fn test_multibyte_positions() {
    let mut cursor = Cursor::new("é<");
    assert_eq!(cursor.consume_while(|c| c != '<'), "é");
    assert_eq!(cursor.position(), 2);
    assert_eq!(cursor.peek(), Ok('<'));
}
