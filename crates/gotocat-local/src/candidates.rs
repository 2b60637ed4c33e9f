//! Candidate URL generation (bounded, deterministic).
//!
//! No network IO happens here: the output is an ordered list of guesses that the verifier probes
//! one by one.

use crate::vocab;
use gotocat_core::{Candidate, LangConfig, Strategy};
use std::collections::BTreeSet;
use url::Url;

enum Scan {
    /// Some token already names the target language; nothing to do.
    AlreadyTarget,
    /// One foreign token rewritten to the target code.
    Substituted(Url),
    NoToken,
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Target,
    Foreign,
}

/// Classify a path segment, host label or parameter value as a language token.
///
/// Configured variants count as the target language even when the vocabulary lacks them (`va`).
fn classify(s: &str, cfg: &LangConfig) -> Option<Token> {
    let primary = vocab::primary_subtag(s)?;
    if cfg.is_target_token(primary) {
        return Some(Token::Target);
    }
    vocab::is_language_token(primary).then_some(Token::Foreign)
}

fn is_lang_param(cfg: &LangConfig, key: &str) -> bool {
    cfg.query_params.iter().any(|p| p.eq_ignore_ascii_case(key))
}

/// Where a language token sits in the URL.
#[derive(Debug, Clone, Copy)]
enum Site {
    Path(usize),
    Host,
    Query(usize),
}

struct Hit {
    site: Site,
    token: Token,
    /// Two-letter codes, locale tags and language-parameter values. Three-letter codes and
    /// language names also spell ordinary words (`new`, `post`, `art`) and are weak.
    strong: bool,
}

fn is_strong(s: &str) -> bool {
    s.len() == 2 || s.contains(&['-', '_'][..])
}

/// Language tokens in URL order: path segments, the leftmost subdomain label, then the values of
/// configured language parameters.
///
/// A weak token only counts as the first path segment. Host labels must be strong. Tokens
/// preceded by a dot are never considered, so hosts like `example.es` keep their suffix.
fn scan(u: &Url, cfg: &LangConfig) -> Vec<Hit> {
    let mut hits = Vec::new();

    if let Some(segments) = u.path_segments() {
        for (i, seg) in segments.enumerate() {
            let Some(token) = classify(seg, cfg) else {
                continue;
            };
            let strong = is_strong(seg);
            if strong || i == 0 {
                hits.push(Hit {
                    site: Site::Path(i),
                    token,
                    strong,
                });
            }
        }
    }

    if let Some(url::Host::Domain(host)) = u.host() {
        let labels: Vec<&str> = host.split('.').collect();
        if labels.len() >= 3 && is_strong(labels[0]) {
            if let Some(token) = classify(labels[0], cfg) {
                hits.push(Hit {
                    site: Site::Host,
                    token,
                    strong: true,
                });
            }
        }
    }

    if let Some(q) = u.query() {
        for (i, part) in q.split('&').enumerate() {
            let Some((k, v)) = part.split_once('=') else {
                continue;
            };
            if !is_lang_param(cfg, k) {
                continue;
            }
            if let Some(token) = classify(v, cfg) {
                hits.push(Hit {
                    site: Site::Query(i),
                    token,
                    strong: true,
                });
            }
        }
    }
    hits
}

fn rewrite(u: &Url, site: Site, code: &str) -> Option<Url> {
    let mut out = u.clone();
    match site {
        Site::Path(i) => {
            let mut segs: Vec<&str> = u.path_segments()?.collect();
            *segs.get_mut(i)? = code;
            out.set_path(&format!("/{}", segs.join("/")));
        }
        Site::Host => {
            let host = u.host_str()?;
            let (_, rest) = host.split_once('.')?;
            out.set_host(Some(&format!("{code}.{rest}"))).ok()?;
        }
        Site::Query(i) => {
            let mut parts: Vec<String> = u.query()?.split('&').map(str::to_string).collect();
            let part = parts.get_mut(i)?;
            let key = part.split_once('=')?.0.to_string();
            *part = format!("{key}={code}");
            out.set_query(Some(&parts.join("&")));
        }
    }
    (out != *u).then_some(out)
}

/// Rewrite exactly one language token: the first strong one, or the first weak one when the URL
/// has no strong token.
fn substitute_tokens(u: &Url, cfg: &LangConfig) -> Scan {
    let mut hits = scan(u, cfg);
    if hits.iter().any(|h| h.strong) {
        hits.retain(|h| h.strong);
    }
    if hits.iter().any(|h| h.token == Token::Target) {
        return Scan::AlreadyTarget;
    }
    match hits.first().and_then(|h| rewrite(u, h.site, &cfg.code)) {
        Some(out) => Scan::Substituted(out),
        None => Scan::NoToken,
    }
}

/// Set `name=code`, replacing the first existing `name` in place and dropping repeats.
fn with_param(u: &Url, name: &str, code: &str) -> Url {
    let mut parts: Vec<String> = Vec::new();
    let mut replaced = false;
    if let Some(q) = u.query() {
        for part in q.split('&').filter(|p| !p.is_empty()) {
            let key = part.split_once('=').map(|(k, _)| k).unwrap_or(part);
            if key == name {
                if !replaced {
                    parts.push(format!("{name}={code}"));
                    replaced = true;
                }
                continue;
            }
            parts.push(part.to_string());
        }
    }
    if !replaced {
        parts.push(format!("{name}={code}"));
    }
    let mut out = u.clone();
    out.set_query(Some(&parts.join("&")));
    out
}

fn injection_candidates(u: &Url, cfg: &LangConfig) -> Vec<Candidate> {
    let code = cfg.code.as_str();
    let path = u.path().to_string();
    let mut out = Vec::new();

    let mut prefix = u.clone();
    prefix.set_path(&format!("/{code}{path}"));
    out.push(Candidate::new(prefix.to_string(), Strategy::PathPrefix));

    // Appended as-is: a root path yields `//{code}`.
    let mut suffix = u.clone();
    suffix.set_path(&format!("{path}/{code}"));
    out.push(Candidate::new(suffix.to_string(), Strategy::PathSuffix));

    if let Some(url::Host::Domain(host)) = u.host() {
        let mut sub = u.clone();
        if sub.set_host(Some(&format!("{code}.{host}"))).is_ok() {
            out.push(Candidate::new(sub.to_string(), Strategy::Subdomain));
        }
    }

    for name in &cfg.query_params {
        out.push(Candidate::new(
            with_param(u, name, code).to_string(),
            Strategy::QueryParam { name: name.clone() },
        ));
    }
    out
}

/// Ordered candidate URLs for `url` in the configured target language.
///
/// - Substitution first: when the URL carries a language token, the rewritten URL is the only
///   candidate.
/// - Otherwise injection, in order: path prefix, path suffix, subdomain, then one candidate per
///   configured query parameter.
/// - Empty when the URL already names the target language or is not an absolute http(s) URL.
/// - Never contains the original URL; no duplicates.
pub fn generate_candidates(url: &str, cfg: &LangConfig) -> Vec<Candidate> {
    let raw = url.trim();
    let Ok(u) = Url::parse(raw) else {
        return Vec::new();
    };
    if !matches!(u.scheme(), "http" | "https") || u.cannot_be_a_base() {
        return Vec::new();
    }

    let generated = match substitute_tokens(&u, cfg) {
        Scan::AlreadyTarget => return Vec::new(),
        Scan::Substituted(rewritten) => vec![Candidate::new(
            rewritten.to_string(),
            Strategy::Substitution,
        )],
        Scan::NoToken => injection_candidates(&u, cfg),
    };

    let mut seen = BTreeSet::<String>::new();
    seen.insert(u.to_string());
    seen.insert(raw.to_string());
    generated
        .into_iter()
        .filter(|c| seen.insert(c.url.clone()))
        .collect()
}
