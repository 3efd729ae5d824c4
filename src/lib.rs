//! A small HTML and CSS selector front end.
//!
//! [`parse_html`] turns markup into a [`DOMNode`] tree and [`parse_css_selectors`] turns a
//! selector list into [`SimpleSelector`]s ordered by specificity. Both run over the same
//! [`cursor::Cursor`] and report failures as a [`ParseError`].

/// Selectors, specificity and the selector list parser
pub mod css;
/// Forward-only scanning over borrowed input
pub mod cursor;
pub mod error;
/// Parsing of HTML to DOM
pub mod html;

pub use css::{parse_css_selectors, parse_rule, SimpleSelector, Specificity, SpecificityOrder};
pub use error::ParseError;
pub use html::{parse_html, DOMElement, DOMNode};
