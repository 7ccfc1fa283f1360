//! Integration tests that invoke the compiled `autocomp` binary

use assert_cmd::Command;
use autocomp_test_utils::TestProject;
use predicates::prelude::*;

/// Get a Command for the autocomp binary rooted at `project`
fn autocomp(project: &TestProject) -> Command {
    let mut cmd = Command::cargo_bin("autocomp").expect("Failed to find autocomp binary");
    cmd.current_dir(project.dir()).env_remove("AUTOCOMP_ROOT");
    cmd
}

fn project_with_components() -> TestProject {
    let project = TestProject::new();
    project.components(&["src/components/Card.svelte", "src/components/form/Input.svelte"]);
    project
}

#[test]
fn test_help_mentions_commands() {
    let project = TestProject::new();
    autocomp(&project)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("transform"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn test_no_command_prints_hint() {
    let project = TestProject::new();
    autocomp(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("autocomp --help"));
}

#[test]
fn test_list_shows_components() {
    let project = project_with_components();
    autocomp(&project)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Card"))
        .stdout(predicate::str::contains("src/components/form/Input.svelte"))
        .stdout(predicate::str::contains("2 components"));
}

#[test]
fn test_list_json() {
    let project = project_with_components();
    project.config(
        "[[external]]\nfrom = \"ui-lib\"\nnames = [\"Button as LButton\"]\n",
    );
    let output = autocomp(&project).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["components"]["Card"]["from"].as_str().unwrap().ends_with("Card.svelte"));
    assert_eq!(json["external"][0]["as"], "LButton");
    assert_eq!(json["external"][0]["name"], "Button");
}

#[test]
fn test_root_flag() {
    let project = project_with_components();
    let elsewhere = TestProject::new();
    autocomp(&elsewhere)
        .args(["list", "--root"])
        .arg(project.dir())
        .assert()
        .success()
        .stdout(predicate::str::contains("Input"));
}

#[test]
fn test_resolve_prints_import() {
    let project = project_with_components();
    autocomp(&project)
        .args(["resolve", "Card"])
        .assert()
        .success()
        .stdout(predicate::str::contains("import Card from"));
}

#[test]
fn test_resolve_unknown_fails() {
    let project = project_with_components();
    autocomp(&project)
        .args(["resolve", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Component 'Nope' not found"));
}

#[test]
fn test_transform_prints_to_stdout() {
    let project = project_with_components();
    project.write("src/App.svelte", "<script>\nlet a = 1\n</script>\n<Card />\n");

    autocomp(&project)
        .args(["transform", "src/App.svelte"])
        .assert()
        .success()
        .stdout(predicate::str::contains("import Card from"))
        .stdout(predicate::str::contains("<Card />"));

    project.assert_file_contains("src/App.svelte", "<script>\nlet a = 1");
}

#[test]
fn test_transform_to_stdout_leaves_artifacts_alone() {
    let project = project_with_components();
    project.config("dts = true\n");
    project.write("src/App.svelte", "<Card />\n");

    autocomp(&project)
        .args(["transform", "src/App.svelte"])
        .assert()
        .success()
        .stdout(predicate::str::contains("import Card from"));

    project.assert_file_not_exists("components.d.ts");
    project.assert_file_contains("src/App.svelte", "<Card />");
}

#[test]
fn test_transform_write_is_idempotent() {
    let project = project_with_components();
    project.write("src/App.svelte", "<Input />\n");

    autocomp(&project)
        .args(["transform", "src/App.svelte", "--write"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Updated"));
    let first = project.read("src/App.svelte");
    assert!(first.starts_with("<script>\nimport Input from"));

    autocomp(&project)
        .args(["transform", "src/App.svelte", "--write"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Up to date"));
    assert_eq!(project.read("src/App.svelte"), first);
}

#[test]
fn test_generate_declaration() {
    let project = project_with_components();
    project.config("dts = \"types/components.d.ts\"\n");

    autocomp(&project)
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("types/components.d.ts"));

    project.assert_file_contains(
        "types/components.d.ts",
        r#"const Input: typeof import("../src/components/form/Input.svelte")["default"]"#,
    );
}

#[test]
fn test_invalid_config_is_reported() {
    let project = TestProject::new();
    project.config("extensions = []\n");

    autocomp(&project)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
