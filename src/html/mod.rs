mod dom;
mod parsing;
#[cfg(test)]
mod tests;

pub use dom::*;
pub use parsing::parse_html;
