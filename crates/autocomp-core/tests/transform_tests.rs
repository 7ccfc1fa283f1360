//! End-to-end tests for usage scanning and import injection

use std::sync::Arc;

use async_trait::async_trait;
use autocomp_core::{Context, Error, ExternalImport, Options, Preprocessor, Result};
use autocomp_test_utils::TestProject;
use pretty_assertions::assert_eq;

fn project_with_card() -> TestProject {
    let project = TestProject::new();
    project.component("src/components/Card.svelte");
    project
}

fn context(project: &TestProject, options: Options) -> Context {
    Context::new(options, project.root()).unwrap()
}

fn app_id(project: &TestProject) -> String {
    project.path("src/App.svelte").to_string()
}

#[tokio::test]
async fn test_injects_import_after_instance_script() {
    let project = project_with_card();
    let mut ctx = context(&project, Options::default());
    let code = "<script>\nlet a = 1\n</script>\n<Card />";

    let result = ctx.transform(code, &app_id(&project)).await.unwrap().unwrap();

    let card = project.path("src/components/Card.svelte");
    assert_eq!(
        result.code,
        format!("<script>\nimport Card from \"{card}\"\n\nlet a = 1\n</script>\n<Card />")
    );
}

#[tokio::test]
async fn test_second_pass_is_a_no_op() {
    let project = project_with_card();
    let mut ctx = context(&project, Options::default());
    let id = app_id(&project);
    let code = "<script>\nlet a = 1\n</script>\n<Card />";

    let first = ctx.transform(code, &id).await.unwrap().unwrap();
    let second = ctx.transform(&first.code, &id).await.unwrap();

    assert!(second.is_none());
}

#[tokio::test]
async fn test_repeated_usage_imports_once() {
    let project = project_with_card();
    let mut ctx = context(&project, Options::default());
    let id = app_id(&project);

    let first = ctx
        .transform("<Card />\n<Card />", &id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.code.matches("import Card from").count(), 1);

    let second = ctx.transform(&first.code, &id).await.unwrap();
    assert!(second.is_none());
}

#[tokio::test]
async fn test_synthesizes_script_when_missing() {
    let project = project_with_card();
    let mut ctx = context(&project, Options::default());

    let result = ctx
        .transform("<Card />", &app_id(&project))
        .await
        .unwrap()
        .unwrap();

    let card = project.path("src/components/Card.svelte");
    assert_eq!(
        result.code,
        format!("<script>\nimport Card from \"{card}\"\n</script>\n<Card />")
    );
}

#[tokio::test]
async fn test_empty_and_disabled_files_are_skipped() {
    let project = project_with_card();
    let mut ctx = context(&project, Options::default());
    let id = app_id(&project);

    assert!(ctx.transform("", &id).await.unwrap().is_none());
    let disabled = "<!-- /* autocomp disabled */ -->\n<Card />";
    assert!(ctx.transform(disabled, &id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_component_does_not_import_itself() {
    let project = project_with_card();
    let mut ctx = context(&project, Options::default());
    let id = project.path("src/components/Card.svelte").to_string();

    let result = ctx.transform("<div><Card /></div>", &id).await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_hand_written_import_is_respected() {
    let project = project_with_card();
    let mut ctx = context(&project, Options::default());
    let code = "<script>\nimport Card from './Other.svelte'\n</script>\n<Card />";

    assert!(ctx.transform(code, &app_id(&project)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_unresolved_names_are_skipped() {
    let project = project_with_card();
    let mut ctx = context(&project, Options::default());

    let result = ctx
        .transform("<Unknown />\n<Card />", &app_id(&project))
        .await
        .unwrap()
        .unwrap();

    assert!(result.code.contains("import Card from"));
    assert!(!result.code.contains("Unknown from"));
}

#[tokio::test]
async fn test_external_component_is_imported() {
    let project = TestProject::new();
    let options = Options {
        external: Some(vec![ExternalImport {
            from: "ui-lib".into(),
            names: vec!["Button as LButton".into()],
            default_import: false,
        }]),
        ..Default::default()
    };
    let mut ctx = context(&project, options);

    let result = ctx
        .transform("<LButton />", &app_id(&project))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        result.code,
        "<script>\nimport { Button as LButton } from \"ui-lib\"\n</script>\n<LButton />"
    );
}

#[tokio::test]
async fn test_import_path_transform_rewrites_specifier() {
    let project = project_with_card();
    let mut ctx = context(&project, Options::default());
    let root = project.root().to_string();
    ctx.set_import_path_transform(Box::new(move |from: &str| {
        from.strip_prefix(&root).map(|rest| format!("$root{rest}"))
    }));

    let result = ctx
        .transform("<Card />", &app_id(&project))
        .await
        .unwrap()
        .unwrap();

    assert!(
        result
            .code
            .contains("import Card from \"$root/src/components/Card.svelte\"")
    );
}

struct ExpandPlaceholder;

#[async_trait]
impl Preprocessor for ExpandPlaceholder {
    async fn preprocess(&self, code: &str, _filename: &str) -> Result<String> {
        Ok(code.replace("{@render card()}", "<Card />"))
    }
}

#[tokio::test]
async fn test_preprocessed_markup_is_scanned() {
    let project = project_with_card();
    let mut ctx = context(&project, Options::default()).with_preprocessor(Arc::new(ExpandPlaceholder));
    let code = "<div>{@render card()}</div>";

    let result = ctx.transform(code, &app_id(&project)).await.unwrap().unwrap();

    assert!(result.code.starts_with("<script>\nimport Card from"));
    assert!(result.code.ends_with("</script>\n<div>{@render card()}</div>"));
}

#[tokio::test]
async fn test_sourcemap_follows_option() {
    let project = project_with_card();
    let id = app_id(&project);

    let mut ctx = context(&project, Options::default());
    let result = ctx.transform("<Card />", &id).await.unwrap().unwrap();
    let map = result.map.expect("source map enabled by default");
    assert_eq!(map.sources, vec![id.clone()]);

    let options = Options {
        sourcemap: Some(false),
        ..Default::default()
    };
    let mut ctx = context(&project, options);
    let result = ctx.transform("<Card />", &id).await.unwrap().unwrap();
    assert!(result.map.is_none());
}

#[tokio::test]
async fn test_parse_error_propagates() {
    let project = project_with_card();
    let mut ctx = context(&project, Options::default());

    let err = ctx
        .transform("<div><Card />", &app_id(&project))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Markup(_)), "got {err:?}");
}

#[tokio::test]
async fn test_usage_is_recorded_per_consumer() {
    let project = project_with_card();
    let mut ctx = context(&project, Options::default());
    let id = app_id(&project);

    let code = "<script>\nimport Modal from './Modal.svelte'\n</script>\n<Card />\n<Modal />\n<Unknown />";
    ctx.transform(code, &id).await.unwrap();

    let usage = ctx.registry().usage_of(&project.path("src/App.svelte")).unwrap();
    assert!(usage.contains("Card"));
    assert!(usage.contains("Unknown"));
    assert!(!usage.contains("Modal"));
}

#[test]
fn test_transform_include() {
    let project = TestProject::new();
    let ctx = context(&project, Options::default());

    assert!(ctx.transform_include("/p/src/App.svelte"));
    assert!(ctx.transform_include("/p/src/App.svelte?type=style&lang.css"));
    assert!(!ctx.transform_include("/p/node_modules/lib/Button.svelte"));
    assert!(!ctx.transform_include("/p/src/main.ts"));
}
