use thiserror::Error;

/// Everything that can stop a parse. Positions are byte offsets into the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A [`Cursor`](crate::cursor::Cursor) was asked for a character past the end of its input
    #[error("read past end of input at byte {position}")]
    OutOfBounds { position: usize },

    /// The markup is not well formed: a delimiter, quote or matching closing tag was missing
    #[error("malformed markup at byte {position}: expected {expected}, found {}", describe(.found))]
    MalformedMarkup {
        position: usize,
        expected: String,
        found: Option<String>,
    },

    /// A selector list contained something that is neither a selector nor a terminator
    #[error("unexpected {} at byte {position} in selector list", describe_char(.found))]
    UnexpectedCharacter { position: usize, found: Option<char> },
}

impl ParseError {
    /// Byte offset the error was raised at
    pub fn position(&self) -> usize {
        match self {
            ParseError::OutOfBounds { position }
            | ParseError::MalformedMarkup { position, .. }
            | ParseError::UnexpectedCharacter { position, .. } => *position,
        }
    }
}

fn describe(found: &Option<String>) -> String {
    match found {
        Some(s) => format!("`{}`", s),
        None => "end of input".to_string(),
    }
}

fn describe_char(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("character `{}`", c),
        None => "end of input".to_string(),
    }
}

#[cfg(test)]
#[test]
fn test_error_messages() {
    let err = ParseError::MalformedMarkup {
        position: 12,
        expected: "`>`".to_string(),
        found: None,
    };
    assert_eq!(
        err.to_string(),
        "malformed markup at byte 12: expected `>`, found end of input"
    );
    let err = ParseError::UnexpectedCharacter {
        position: 3,
        found: Some(';'),
    };
    assert_eq!(
        err.to_string(),
        "unexpected character `;` at byte 3 in selector list"
    );
    assert_eq!(err.position(), 3);
}
