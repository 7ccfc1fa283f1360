//! Integration tests for template parsing.

use autocomp_markup::{ElementKind, Error, Node, parse};
use rstest::rstest;

#[test]
fn test_collects_nested_components_in_order() {
    let src = r#"<script>
    let open = false
</script>

<Layout>
    <Header title="Home" />
    {#if open}
        <Modal on:close={() => (open = false)}>
            <Card />
        </Modal>
    {/if}
    <Card />
</Layout>
"#;
    let ast = parse(src).unwrap();
    assert_eq!(ast.component_names(), vec!["Layout", "Header", "Modal", "Card"]);
}

#[test]
fn test_reserved_elements_are_not_components() {
    let src = "<svelte:head><title>x</title></svelte:head><svelte:window /><Card />";
    let ast = parse(src).unwrap();
    assert_eq!(ast.component_names(), vec!["Card"]);

    let Node::Element(head) = &ast.html.children[0] else {
        panic!("expected element");
    };
    assert_eq!(head.kind, ElementKind::Special);
}

#[test]
fn test_markup_without_script() {
    let src = "<div class=\"wrap\"><Button /></div>";
    let ast = parse(src).unwrap();
    assert!(ast.instance.is_none());
    assert_eq!(ast.html.start, 0);
    assert_eq!(ast.component_names(), vec!["Button"]);
}

#[test]
fn test_html_start_skips_leading_script_and_style() {
    let src = "<script>let a</script><style>p{color:red}</style><p>hi</p>";
    let ast = parse(src).unwrap();
    assert_eq!(&src[ast.html.start..], "<p>hi</p>");
}

#[test]
fn test_tags_inside_script_and_comments_are_ignored() {
    let src = "<script>const s = '<Fake />'</script><!-- <Hidden /> --><Real />";
    let ast = parse(src).unwrap();
    assert_eq!(ast.component_names(), vec!["Real"]);
}

#[test]
fn test_braces_and_quotes_in_attributes() {
    let src = r#"<Card title="{a ? "}" : '{'}" data={{ x: "}" }} {...rest} disabled />"#;
    let ast = parse(src).unwrap();
    assert_eq!(ast.component_names(), vec!["Card"]);
    let Node::Element(card) = &ast.html.children[0] else {
        panic!("expected element");
    };
    assert_eq!(card.attributes.len(), 4);
    assert_eq!(card.attributes[3].name, "disabled");
}

#[test]
fn test_unquoted_attribute_with_non_ascii_value() {
    let src = "<Card label=héllo />\n<Badge text=日本 class=x>ü</Badge>";
    let ast = parse(src).unwrap();
    assert_eq!(ast.component_names(), vec!["Card", "Badge"]);
}

#[test]
fn test_void_elements_need_no_closing_tag() {
    let src = "<div><input type=text><br><Icon /></div>";
    let ast = parse(src).unwrap();
    assert_eq!(ast.component_names(), vec!["Icon"]);
}

#[test]
fn test_dotted_component_names() {
    let ast = parse("<ui.Button /><Tabs.Panel></Tabs.Panel>").unwrap();
    assert_eq!(ast.component_names(), vec!["ui.Button", "Tabs.Panel"]);
}

#[rstest]
#[case("<div>")]
#[case("<Card")]
#[case("</div>")]
#[case("<!-- open")]
#[case("<script>let a")]
#[case("{#if x")]
#[case("<a href=\"x>")]
#[case("<script>a</script><script>b</script>")]
fn test_malformed_input_fails(#[case] src: &str) {
    let err = parse(src).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn test_error_reports_line_and_column() {
    let src = "<div>\n  <span>\n</div>";
    let Error::Parse { line, column, .. } = parse(src).unwrap_err();
    assert_eq!((line, column), (3, 1));
}
