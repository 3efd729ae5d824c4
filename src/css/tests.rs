use super::*;
use crate::error::ParseError;
use crate::html::{parse_html, DOMElement};

fn selector(tag_name: &str, id: &str, classes: &[&str]) -> SimpleSelector {
    SimpleSelector {
        tag_name: tag_name.to_string(),
        id: id.to_string(),
        class_arr: classes.iter().map(|c| c.to_string()).collect(),
    }
}

#[test]
fn test_specificity() {
    assert_eq!(selector("div", "", &[]).specificity(), Specificity(100, 0, 0));
    assert_eq!(selector("", "x", &[]).specificity(), Specificity(0, 0, 1));
    assert_eq!(selector("", "", &["a", "b"]).specificity(), Specificity(100, 20, 1));
    assert_eq!(selector("p", "x", &["a"]).specificity(), Specificity(0, 10, 0));
    assert_eq!(SimpleSelector::default().specificity().sum(), 101);
}

#[test]
fn test_specificity_sum_saturates() {
    assert_eq!(Specificity(100, 20, 1).sum(), 121);
    assert_eq!(Specificity(100, u32::MAX - 50, 1).sum(), u32::MAX);
    let huge = Specificity(u32::MAX, u32::MAX, u32::MAX);
    assert_eq!(huge.sum(), u32::MAX);
}

#[test]
fn test_selector_list_order() {
    let selectors = parse_css_selectors(".a.b, #x, div").unwrap();
    assert_eq!(
        selectors,
        vec![
            selector("", "x", &[]),
            selector("div", "", &[]),
            selector("", "", &["a", "b"]),
        ]
    );
    let sums: Vec<u32> = selectors.iter().map(|s| s.specificity().sum()).collect();
    assert_eq!(sums, [1, 100, 121]);
}

#[test]
fn test_equal_weights_keep_source_order() {
    let selectors = parse_css_selectors("h3,h1 ,  h2 {").unwrap();
    let names: Vec<String> = selectors.iter().map(ToString::to_string).collect();
    assert_eq!(names, ["h3", "h1", "h2"]);
}

#[test]
fn test_lexicographic_order() {
    // div is (100, 0, 0) and the id selector is (0, 110, 1)
    let source = "div, #x.a.b.c.d.e.f.g.h.i.j.k";
    let mut selectors = parse_css_selectors(source).unwrap();
    assert_eq!(selectors[0].tag_name, "div");
    assert_eq!(selectors[1].specificity(), Specificity(0, 110, 1));

    sort_by_specificity(&mut selectors, SpecificityOrder::Lexicographic);
    assert_eq!(selectors[0].id, "x");
    assert_eq!(selectors[1].tag_name, "div");

    sort_by_specificity(&mut selectors, SpecificityOrder::Sum);
    assert_eq!(selectors[0].tag_name, "div");
    assert!(Specificity(1, 0, 0) > Specificity(0, 50, 50));
}

#[test]
fn test_universal_selector() {
    let selectors = parse_css_selectors("*").unwrap();
    assert_eq!(selectors, vec![SimpleSelector::default()]);
    assert_eq!(selectors[0].to_string(), "*");
    let selectors = parse_css_selectors("*.note").unwrap();
    assert_eq!(selectors, vec![selector("", "", &["note"])]);
}

#[test]
fn test_tag_then_classes() {
    let selectors = parse_css_selectors("li .item").unwrap();
    assert_eq!(selectors, vec![selector("li", "", &["item"])]);
}

#[test]
fn test_unexpected_character() {
    assert_eq!(
        parse_css_selectors("div; p"),
        Err(ParseError::UnexpectedCharacter {
            position: 3,
            found: Some(';')
        })
    );
    assert_eq!(
        parse_css_selectors("a > b"),
        Err(ParseError::UnexpectedCharacter {
            position: 2,
            found: Some('>')
        })
    );
    assert_eq!(
        parse_css_selectors("#a ! "),
        Err(ParseError::UnexpectedCharacter {
            position: 3,
            found: Some('!')
        })
    );
}

#[test]
fn test_empty_selectors_are_kept() {
    // a and b weigh 100, the empty selector weighs 101
    assert_eq!(
        parse_css_selectors("a,,b"),
        Ok(vec![
            selector("a", "", &[]),
            selector("b", "", &[]),
            SimpleSelector::default(),
        ])
    );
    assert_eq!(
        parse_css_selectors("a, "),
        Ok(vec![selector("a", "", &[]), SimpleSelector::default()])
    );
    assert_eq!(parse_css_selectors(""), Ok(vec![SimpleSelector::default()]));
    assert_eq!(parse_css_selectors("#{"), Ok(vec![SimpleSelector::default()]));
}

#[test]
fn test_matches() {
    let el = DOMElement::new(
        "div",
        Some(crate::attributes!(id => "main", class => "card wide")),
        vec![],
    );
    assert!(selector("div", "", &[]).matches(&el));
    assert!(selector("", "main", &["wide"]).matches(&el));
    assert!(selector("div", "main", &["card", "wide", "card"]).matches(&el));
    assert!(SimpleSelector::default().matches(&el));
    assert!(!selector("p", "", &[]).matches(&el));
    assert!(!selector("", "other", &[]).matches(&el));
    assert!(!selector("", "", &["card", "tall"]).matches(&el));
}

#[test]
fn test_matches_parsed_document() {
    let root = parse_html(
        r#"<ul id="nav"><li class="item active">a</li><li class="item">b</li></ul>"#,
    )
    .unwrap();
    let selectors = parse_css_selectors("li.active, #nav, .item").unwrap();
    let matched: Vec<Vec<&str>> = selectors
        .iter()
        .map(|s| {
            root.elements()
                .into_iter()
                .filter(|el| s.matches(el))
                .map(|el| el.tag_name.as_str())
                .collect()
        })
        .collect();
    // #nav (1), li.active (110), .item (111)
    assert_eq!(matched, vec![vec!["ul"], vec!["li"], vec!["li", "li"]]);
}
