//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

const ARTICLE: &str = r#"<!DOCTYPE html>
<html>
<head>
<title>Kubo Education - About</title>
<meta name="description" content="Teaching children to read">
</head>
<body>
<h1>Kubo</h1>
<p>Kubo Education teaches children to read.</p>
<p>Contact us for details.</p>
</body>
</html>"#;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("traducto").unwrap()
}

/// Write the article fixture into a temp dir and return (dir, file path).
fn fixture() -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("article.html");
    std::fs::write(&path, ARTICLE).unwrap();
    (tmp, path)
}

/// Run `prepare` into a fresh output dir and return (dir, output path).
fn prepared_run() -> (TempDir, std::path::PathBuf) {
    let (tmp, article) = fixture();
    let out = tmp.path().join("run");

    cmd()
        .arg("prepare")
        .arg(&article)
        .args(["-o", out.to_str().unwrap()])
        .assert()
        .success();

    (tmp, out)
}

#[test]
fn test_prepare_file_input() {
    let (tmp, article) = fixture();
    let out = tmp.path().join("run");

    cmd()
        .arg("prepare")
        .arg(&article)
        .args(["-o", out.to_str().unwrap()])
        .assert()
        .success();

    assert!(out.join("template.html").exists());
    assert!(out.join("strings.json").exists());
    assert!(out.join("en.html").exists());
}

#[test]
fn test_prepare_stdin_input() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("run");

    cmd()
        .arg("prepare")
        .arg("-")
        .args(["-o", out.to_str().unwrap()])
        .write_stdin(ARTICLE)
        .assert()
        .success();

    assert!(out.join("template.html").exists());
}

#[test]
fn test_prepare_template_has_placeholders() {
    let (_tmp, out) = prepared_run();

    let template = std::fs::read_to_string(out.join("template.html")).unwrap();
    assert!(template.contains("{{ s0 }}"));
    assert!(!template.contains("Kubo Education teaches"));
}

#[test]
fn test_prepare_strings_manifest_is_valid_json() {
    let (_tmp, out) = prepared_run();

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("strings.json")).unwrap()).unwrap();

    assert_eq!(manifest["source_lang"], "EN");
    assert_eq!(manifest["target_langs"], serde_json::json!(["FR", "NL"]));
    assert!(manifest["fragments"].as_array().unwrap().len() >= 3);
    assert_eq!(manifest["meta"]["title"], "Kubo Education - About");
}

#[test]
fn test_prepare_custom_languages() {
    let (tmp, article) = fixture();
    let out = tmp.path().join("run");

    cmd()
        .arg("prepare")
        .arg(&article)
        .args(["-o", out.to_str().unwrap(), "--from", "DE", "--to", "ES,IT,PT"])
        .assert()
        .success();

    assert!(out.join("de.html").exists());
    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("strings.json")).unwrap()).unwrap();
    assert_eq!(manifest["target_langs"], serde_json::json!(["ES", "IT", "PT"]));
}

#[test]
fn test_prepare_custom_layout() {
    let (tmp, article) = fixture();
    let out = tmp.path().join("run");
    let layout = tmp.path().join("layout.html");
    std::fs::write(&layout, "<main>{{ content }}</main>").unwrap();

    cmd()
        .arg("prepare")
        .arg(&article)
        .args(["-o", out.to_str().unwrap(), "--layout", layout.to_str().unwrap()])
        .assert()
        .success();

    let template = std::fs::read_to_string(out.join("template.html")).unwrap();
    assert!(template.starts_with("<main>"));
    assert!(template.ends_with("</main>"));
}

#[test]
fn test_prepare_invalid_file() {
    cmd().arg("prepare").arg("nonexistent.html").assert().failure();
}

#[test]
fn test_prepare_empty_input_fails() {
    cmd()
        .arg("prepare")
        .arg("-")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("prepare").or(predicate::str::contains("empty")));
}

#[test]
fn test_prepare_verbose_banner() {
    let (tmp, article) = fixture();
    let out = tmp.path().join("run");

    cmd()
        .arg("prepare")
        .arg(&article)
        .args(["-o", out.to_str().unwrap(), "-v"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Traducto"));
}

#[test]
fn test_translate_pseudo_provider() {
    let (_tmp, out) = prepared_run();

    cmd()
        .arg("translate")
        .arg(&out)
        .args(["--provider", "pseudo"])
        .assert()
        .success();

    let matrix: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("matrix.json")).unwrap()).unwrap();
    assert_eq!(matrix["languages"], serde_json::json!(["FR", "NL"]));

    let first = matrix["cells"][0][0].as_str().unwrap();
    assert!(first.starts_with("[FR] "));
}

#[test]
fn test_translate_unknown_provider() {
    let (_tmp, out) = prepared_run();

    cmd()
        .arg("translate")
        .arg(&out)
        .args(["--provider", "bing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid provider"));
}

#[test]
fn test_translate_missing_manifest() {
    let tmp = TempDir::new().unwrap();

    cmd().arg("translate").arg(tmp.path()).assert().failure();
}

#[test]
fn test_render_produces_language_documents() {
    let (_tmp, out) = prepared_run();

    cmd().arg("translate").arg(&out).assert().success();
    cmd().arg("render").arg(&out).assert().success();

    let fr = std::fs::read_to_string(out.join("fr.html")).unwrap();
    let nl = std::fs::read_to_string(out.join("nl.html")).unwrap();

    assert!(fr.contains("[FR] Kubo"));
    assert!(nl.contains("[NL] Kubo"));
    assert!(!fr.contains("{{ s"));
}

#[test]
fn test_render_without_matrix_fails() {
    let (_tmp, out) = prepared_run();

    cmd().arg("render").arg(&out).assert().failure();
}

#[test]
fn test_completions_script_on_stdout() {
    cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("traducto"));
}

#[test]
fn test_completions_rejects_unknown_shell() {
    cmd().args(["completions", "tcsh"]).assert().failure();
}

#[test]
fn test_full_pipeline_round_trip() {
    let (_tmp, out) = prepared_run();

    cmd().arg("translate").arg(&out).assert().success();
    cmd().arg("render").arg(&out).assert().success();

    let fr = std::fs::read_to_string(out.join("fr.html")).unwrap();
    let en = std::fs::read_to_string(out.join("en.html")).unwrap();

    // same markup skeleton, different text
    assert_eq!(fr.matches("<p>").count(), en.matches("<p>").count());
    assert_ne!(fr, en);
}
