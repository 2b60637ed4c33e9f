//! Run configuration: env file, language config, store location.

use anyhow::Context;
use gotocat_core::LangConfig;
use std::path::{Path, PathBuf};

/// Optional env-file loader (opt-in via `GOTOCAT_ENV_FILE`).
///
/// Sets vars only if not already present in the process environment.
pub(crate) fn load_env_file() {
    let Ok(p) = std::env::var("GOTOCAT_ENV_FILE") else {
        return;
    };
    let p = p.trim();
    if p.is_empty() {
        return;
    }
    let Ok(txt) = std::fs::read_to_string(p) else {
        return;
    };
    for raw in txt.lines() {
        let s = raw.trim();
        if s.is_empty() || s.starts_with('#') {
            continue;
        }
        let Some((k, v)) = s.split_once('=') else {
            continue;
        };
        let k = k.trim();
        if k.is_empty() {
            continue;
        }
        if std::env::var_os(k).is_none() {
            std::env::set_var(k, v.trim());
        }
    }
}

/// Defaults, then the JSON file (if any), then the target-language override.
pub(crate) fn load_config(path: Option<&Path>, target_lang: Option<&str>) -> anyhow::Result<LangConfig> {
    let cfg = match path {
        Some(p) => {
            let txt = std::fs::read_to_string(p)
                .with_context(|| format!("read config {}", p.display()))?;
            LangConfig::from_json_str(&txt).with_context(|| format!("parse config {}", p.display()))?
        }
        None => LangConfig::default().normalized()?,
    };
    match target_lang.map(str::trim).filter(|s| !s.is_empty()) {
        Some(code) => Ok(cfg.with_target(code)?),
        None => Ok(cfg),
    }
}

pub(crate) fn store_path(arg: Option<PathBuf>) -> PathBuf {
    arg.filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(gotocat_local::FsStore::default_path)
}
