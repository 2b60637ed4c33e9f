use assert_cmd::Command;
use predicates::prelude::*;

fn gotocat() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gotocat"));
    cmd.env_remove("GOTOCAT_ENV_FILE")
        .env_remove("GOTOCAT_CONFIG")
        .env_remove("GOTOCAT_TARGET_LANG");
    cmd
}

#[test]
fn candidates_substitute_language_segment() {
    let out = gotocat()
        .args(["candidates", "https://example.com/es/page?x=1"])
        .output()
        .expect("run gotocat candidates");
    assert!(out.status.success());

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    assert_eq!(v["kind"].as_str(), Some("candidates"));
    let cands = v["candidates"].as_array().expect("candidates array");
    assert_eq!(cands.len(), 1);
    assert_eq!(
        cands[0]["url"].as_str(),
        Some("https://example.com/ca/page?x=1")
    );
    assert_eq!(cands[0]["strategy"]["kind"].as_str(), Some("substitution"));
}

#[test]
fn candidates_inject_in_fixed_order_as_text() {
    gotocat()
        .args(["candidates", "https://foo.com/", "--output", "text"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "https://foo.com/ca/\n\
             https://foo.com//ca\n\
             https://ca.foo.com/\n\
             https://foo.com/?lang=ca\n\
             https://foo.com/?ln=ca\n\
             https://foo.com/?hl=ca\n",
        ));
}

#[test]
fn candidates_empty_when_already_in_target_language() {
    let out = gotocat()
        .args(["candidates", "https://example.com/ca/page"])
        .output()
        .expect("run gotocat candidates");
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    assert_eq!(v["candidates"].as_array().map(Vec::len), Some(0));
}

#[test]
fn target_lang_override_changes_candidates() {
    gotocat()
        .args([
            "candidates",
            "https://example.com/es/page",
            "--target-lang",
            "eu",
            "--output",
            "text",
        ])
        .assert()
        .success()
        .stdout(predicate::eq("https://example.com/eu/page\n"));
}

#[test]
fn config_file_is_loaded() {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("gotocat.json");
    std::fs::write(&p, r#"{"code":"gl","keywords":["galego"]}"#).unwrap();

    let out = gotocat()
        .args(["config"])
        .arg("--config")
        .arg(&p)
        .output()
        .expect("run gotocat config");
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    assert_eq!(v["config"]["code"].as_str(), Some("gl"));
    assert_eq!(v["config"]["keywords"][0].as_str(), Some("galego"));
    // Fields missing from the file keep their defaults.
    assert_eq!(v["config"]["query_params"][0].as_str(), Some("lang"));
}

#[test]
fn invalid_config_fails_with_message() {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("bad.json");
    std::fs::write(&p, "{not json").unwrap();

    gotocat()
        .args(["config"])
        .arg("--config")
        .arg(&p)
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse config"));
}

#[test]
fn env_file_fills_unset_vars_only() {
    let tmp = tempfile::tempdir().unwrap();
    let env_file = tmp.path().join("gotocat.env");
    std::fs::write(&env_file, "# local overrides\nGOTOCAT_TARGET_LANG=gl\n").unwrap();

    let out = gotocat()
        .args(["config"])
        .env("GOTOCAT_ENV_FILE", &env_file)
        .output()
        .expect("run gotocat config");
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    assert_eq!(v["config"]["code"].as_str(), Some("gl"));

    let out = gotocat()
        .args(["config"])
        .env("GOTOCAT_ENV_FILE", &env_file)
        .env("GOTOCAT_TARGET_LANG", "eu")
        .output()
        .expect("run gotocat config");
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    assert_eq!(v["config"]["code"].as_str(), Some("eu"));
}

#[test]
fn invalid_target_lang_is_rejected() {
    gotocat()
        .args(["config", "--target-lang", "ca-"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}
