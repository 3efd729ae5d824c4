use std::cmp::Ordering;
use std::fmt::{self, Display};

use crate::html::DOMElement;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rule {
    pub selectors: Vec<SimpleSelector>,
    pub declarations: Vec<Declaration>,
}

/// A tag name, an id and any number of classes. Empty strings mean "unconstrained".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleSelector {
    pub tag_name: String,
    pub id: String,
    pub class_arr: Vec<String>,
}

impl SimpleSelector {
    /// Ids and tag names lower the weight and classes raise it:
    /// `a` is 100 without an id, `b` is 10 per class, `c` is 1 without a tag name.
    pub fn specificity(&self) -> Specificity {
        let a = if self.id.is_empty() { 100 } else { 0 };
        let b = u32::try_from(self.class_arr.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(10);
        let c = if self.tag_name.is_empty() { 1 } else { 0 };
        Specificity(a, b, c)
    }

    /// Does this selector match `elem` on its own, without looking at the rest of the tree
    pub fn matches(&self, elem: &DOMElement) -> bool {
        if !self.tag_name.is_empty() && elem.tag_name != self.tag_name {
            return false;
        }
        if !self.id.is_empty() && elem.id() != Some(&self.id) {
            return false;
        }
        let elem_classes = elem.classes();
        self.class_arr
            .iter()
            .all(|class| elem_classes.contains(class.as_str()))
    }
}

impl Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tag_name.is_empty() && self.id.is_empty() && self.class_arr.is_empty() {
            return f.write_str("*");
        }
        f.write_str(&self.tag_name)?;
        if !self.id.is_empty() {
            write!(f, "#{}", self.id)?;
        }
        for class in &self.class_arr {
            write!(f, ".{}", class)?;
        }
        Ok(())
    }
}

// Ids, Classes, Elements
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// `a + b + c`, clamped at `u32::MAX`
    pub fn sum(&self) -> u32 {
        self.0.saturating_add(self.1).saturating_add(self.2)
    }
}

impl From<(u32, u32, u32)> for Specificity {
    fn from(el: (u32, u32, u32)) -> Self {
        Self(el.0, el.1, el.2)
    }
}

/// How a selector list is ordered once parsed
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum SpecificityOrder {
    /// Ascending by `a + b + c`
    #[default]
    Sum,
    /// Ascending by `a`, then `b`, then `c`
    Lexicographic,
}

impl SpecificityOrder {
    pub fn compare(self, lhs: &SimpleSelector, rhs: &SimpleSelector) -> Ordering {
        let (lhs, rhs) = (lhs.specificity(), rhs.specificity());
        match self {
            SpecificityOrder::Sum => lhs.sum().cmp(&rhs.sum()),
            SpecificityOrder::Lexicographic => lhs.cmp(&rhs),
        }
    }
}

/// Stable sort, so selectors of equal weight keep their source order
pub fn sort_by_specificity(selectors: &mut [SimpleSelector], order: SpecificityOrder) {
    selectors.sort_by(|a, b| order.compare(a, b));
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Keyword(String),
    Length(f32, Unit),
    ColorValue(Color),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Px,
    Em,
    Rem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

mod parsing;
#[cfg(test)]
mod tests;

pub use parsing::{parse_css_selectors, parse_rule};
