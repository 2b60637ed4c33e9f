#[test]
fn gotocat_version_contract() {
    let bin = assert_cmd::cargo::cargo_bin!("gotocat");
    let out = std::process::Command::new(bin)
        .args(["version"])
        // Keep the run hermetic: no env-file autoload, no inherited config.
        .env_remove("GOTOCAT_ENV_FILE")
        .env_remove("GOTOCAT_CONFIG")
        .output()
        .expect("run gotocat version");

    assert!(out.status.success(), "gotocat version failed");
    let s = String::from_utf8_lossy(&out.stdout);
    let v: serde_json::Value = serde_json::from_str(&s).expect("parse version json");

    assert_eq!(v["schema_version"].as_u64(), Some(1));
    assert_eq!(v["kind"].as_str(), Some("version"));
    assert_eq!(v["ok"].as_bool(), Some(true));
    assert_eq!(v["name"].as_str(), Some("gotocat"));
    assert!(!v["version"].as_str().unwrap_or("").is_empty());
}

#[test]
fn gotocat_version_text_output() {
    let bin = assert_cmd::cargo::cargo_bin!("gotocat");
    let out = std::process::Command::new(bin)
        .args(["version", "--output", "text"])
        .env_remove("GOTOCAT_ENV_FILE")
        .output()
        .expect("run gotocat version --output text");

    assert!(out.status.success());
    let s = String::from_utf8_lossy(&out.stdout);
    assert!(s.starts_with("gotocat "), "unexpected: {s}");
}
