use super::*;
use crate::error::ParseError;

#[test]
fn test_document() {
    let i = r#"<html lang="en">
    <head>
        <title>The minimal, valid HTML5 document</title>
    </head>
    <body>
        <p>Some paragraph</p>
        Some untagged text
    </body>
</html>"#;
    // Only spaces are skipped between nodes, so the newline runs survive as text
    let target: DOMNode = DOMElement::new(
        "html",
        Some(crate::attributes!(lang => "en")),
        vec![
            "\n    ".into(),
            DOMElement::new(
                "head",
                None,
                vec![
                    "\n        ".into(),
                    DOMElement::new(
                        "title",
                        None,
                        vec!["The minimal, valid HTML5 document".into()],
                    )
                    .into(),
                    "\n    ".into(),
                ],
            )
            .into(),
            "\n    ".into(),
            DOMElement::new(
                "body",
                None,
                vec![
                    "\n        ".into(),
                    DOMElement::new("p", None, vec!["Some paragraph".into()]).into(),
                    "\n        Some untagged text\n    ".into(),
                ],
            )
            .into(),
            "\n".into(),
        ],
    )
    .into();
    assert_eq!(parse_html(i), Ok(target));
}

#[test]
fn test_hello_world() {
    let root = parse_html("<html><body>Hello, world!</body></html>").unwrap();
    let html = root.as_element().unwrap();
    assert_eq!(html.tag_name, "html");
    assert_eq!(html.children.len(), 1);
    let body = html.children[0].as_element().unwrap();
    assert_eq!(body.tag_name, "body");
    assert_eq!(body.children, vec![DOMNode::text("Hello, world!")]);
}

#[test]
fn test_root_wrapping() {
    assert_eq!(
        parse_html(""),
        Ok(DOMNode::element("html", DOMAttributes::empty(), vec![]))
    );
    assert_eq!(parse_html("   "), parse_html(""));
    assert_eq!(parse_html("just text"), Ok(DOMNode::text("just text")));

    let root = parse_html("<p>a</p> <p>b</p>").unwrap();
    let html = root.as_element().unwrap();
    assert_eq!(html.tag_name, "html");
    assert!(html.attributes.is_empty());
    let names: Vec<&str> = html
        .children
        .iter()
        .filter_map(DOMNode::as_element)
        .map(|e| e.tag_name.as_str())
        .collect();
    assert_eq!(names, ["p", "p"]);
    assert_eq!(html.children[1].children()[0].as_text(), Some("b"));
}

#[test]
fn test_root_is_not_rewrapped() {
    let root = parse_html(r#"<div id="only"></div>"#).unwrap();
    let div = root.as_element().unwrap();
    assert_eq!(div.tag_name, "div");
    assert_eq!(div.id().map(String::as_str), Some("only"));
}

#[test]
fn test_duplicate_attributes_overwrite() {
    let root = parse_html(r#"<a href='one' title="t" href="two"></a>"#).unwrap();
    let a = root.as_element().unwrap();
    assert_eq!(a.attributes, crate::attributes!(href => "two", title => "t"));
}

#[test]
fn test_nested_balance() {
    let root = parse_html("<a><b><c>deep</c></b><b></b></a>").unwrap();
    assert_eq!(root.elements().len(), 4);
    assert_eq!(root.children()[0].children()[0].children()[0].as_text(), Some("deep"));
}

#[test]
fn test_mismatched_close() {
    let err = parse_html("<a><b></a></b>").unwrap_err();
    assert_eq!(
        err,
        ParseError::MalformedMarkup {
            position: 8,
            expected: "closing tag `</b>`".to_string(),
            found: Some("</a".to_string()),
        }
    );
}

#[test]
fn test_stray_close_tag() {
    assert!(matches!(
        parse_html("<p>x</p></div>"),
        Err(ParseError::MalformedMarkup { position: 8, .. })
    ));
    assert!(parse_html("</div>").is_err());
}

#[test]
fn test_truncated_input() {
    for input in ["<", "<p", "<p ", "<p id", r#"<p id=""#, "<p>", "<p></p", "<p></"] {
        assert!(
            matches!(parse_html(input), Err(ParseError::MalformedMarkup { .. })),
            "{:?} should be rejected",
            input
        );
    }
}

#[test]
fn test_missing_equals_and_quotes() {
    assert!(matches!(
        parse_html("<p id></p>"),
        Err(ParseError::MalformedMarkup { position: 5, .. })
    ));
    assert!(matches!(
        parse_html("<p id=x></p>"),
        Err(ParseError::MalformedMarkup { position: 6, .. })
    ));
}

#[test]
fn test_serialized_tree_reparses() {
    let source = r#"<div class="card" id="x"><h1>Title</h1><p>Body <b>bold</b>, text</p></div>"#;
    let tree = parse_html(source).unwrap();
    assert_eq!(tree.to_string(), source);
    assert_eq!(parse_html(&tree.to_string()), Ok(tree));
}
