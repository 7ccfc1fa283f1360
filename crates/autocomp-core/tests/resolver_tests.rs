//! Tests for two-tier component resolution

use autocomp_core::{Context, ExternalImport, ImportInfo, Options};
use autocomp_fs::NormalizedPath;
use pretty_assertions::assert_eq;

fn context(external: Vec<ExternalImport>) -> Context {
    let options = Options {
        external: Some(external),
        ..Default::default()
    };
    Context::new(options, NormalizedPath::new("/project")).unwrap()
}

fn lib(from: &str, names: &[&str], default_import: bool) -> ExternalImport {
    ExternalImport {
        from: from.to_string(),
        names: names.iter().map(|n| n.to_string()).collect(),
        default_import,
    }
}

#[test]
fn test_aliased_external_export() {
    let ctx = context(vec![lib("lib", &["Button as LButton"], false)]);
    assert_eq!(
        ctx.find_component("LButton", &[]),
        Some(ImportInfo {
            alias: "LButton".into(),
            from: "lib".into(),
            name: Some("Button".into()),
            default_import: false,
        })
    );
}

#[test]
fn test_first_matching_declaration_wins() {
    let ctx = context(vec![
        lib("first", &["Modal"], true),
        lib("second", &["Modal"], false),
    ]);
    let info = ctx.find_component("Modal", &[]).unwrap();
    assert_eq!(info.from, "first");
    assert!(info.default_import);
}

#[test]
fn test_identifier_containing_as_is_not_an_alias() {
    let ctx = context(vec![lib("canvas", &["Canvas", "Alias"], false)]);
    assert_eq!(ctx.find_component("Canvas", &[]).unwrap().name, None);
    assert_eq!(ctx.find_component("Alias", &[]).unwrap().alias, "Alias");
}

#[test]
fn test_local_component_shadows_external() {
    let mut ctx = context(vec![lib("lib", &["Button"], false)]);
    ctx.add_components([NormalizedPath::new("/project/src/components/Button.svelte")]);

    let info = ctx.find_component("Button", &[]).unwrap();
    assert_eq!(info.from, "/project/src/components/Button.svelte");
    assert!(info.default_import);
}

#[test]
fn test_excluded_path_never_resolves_to_itself() {
    let mut ctx = context(vec![]);
    let card = "/project/src/components/Card.svelte";
    ctx.add_components([NormalizedPath::new(card)]);

    assert_eq!(ctx.find_component("Card", &[card]), None);
    assert_eq!(ctx.find_component("Card", &[card.trim_start_matches('/')]), None);
    assert!(ctx.find_component("Card", &["/project/src/App.svelte"]).is_some());
}

#[test]
fn test_excluded_local_falls_through_to_external() {
    let mut ctx = context(vec![lib("lib", &["Card"], false)]);
    let card = "/project/src/components/Card.svelte";
    ctx.add_components([NormalizedPath::new(card)]);

    assert_eq!(ctx.find_component("Card", &[card]).unwrap().from, "lib");
}

#[test]
fn test_unknown_name() {
    let ctx = context(vec![lib("lib", &["Button as LButton"], false)]);
    assert_eq!(ctx.find_component("Button", &[]), None);
    assert_eq!(ctx.find_component("Nope", &[]), None);
}

#[test]
fn test_custom_components_are_not_resolved() {
    let mut ctx = context(vec![]);
    ctx.add_custom_component(ImportInfo::local("Icon", "icons"));
    assert_eq!(ctx.find_component("Icon", &[]), None);
    assert!(ctx.registry().all_components().contains_key("Icon"));
}
