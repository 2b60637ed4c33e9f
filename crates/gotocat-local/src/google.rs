//! Language filter links for Google search result pages (`lr=lang_<code>`).

use gotocat_core::{Error, Result};
use serde::Serialize;

pub const DEFAULT_FILTER_LANGS: &[&str] = &["ca", "es", "en", "sv"];

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FilterLink {
    pub lang: String,
    pub url: String,
}

/// `google.<tld>` or `www.google.<tld>`, including two-label suffixes like `google.co.uk`.
fn is_google_host(host: &str) -> bool {
    let host = host.trim().to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let Some(suffix) = host.strip_prefix("google.") else {
        return false;
    };
    !suffix.is_empty()
        && suffix.split('.').count() <= 2
        && suffix
            .split('.')
            .all(|l| !l.is_empty() && l.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// One link per language, each the search URL with `lr` set to `lang_<code>`.
pub fn google_language_filter_links(url: &str, langs: &[String]) -> Result<Vec<FilterLink>> {
    let u = url::Url::parse(url.trim()).map_err(|e| Error::InvalidUrl(e.to_string()))?;
    let host = u.host_str().unwrap_or_default();
    if !matches!(u.scheme(), "http" | "https")
        || !is_google_host(host)
        || !u.path().starts_with("/search")
    {
        return Err(Error::NotSupported(format!(
            "not a google search url: {url}"
        )));
    }

    let mut out = Vec::with_capacity(langs.len());
    for lang in langs {
        let lang = lang.trim().to_ascii_lowercase();
        if lang.is_empty() {
            continue;
        }
        let pairs: Vec<(String, String)> = u
            .query_pairs()
            .into_owned()
            .filter(|(k, _)| k != "lr")
            .collect();
        let mut link = u.clone();
        link.query_pairs_mut()
            .clear()
            .extend_pairs(pairs)
            .append_pair("lr", &format!("lang_{lang}"));
        out.push(FilterLink {
            lang,
            url: link.to_string(),
        });
    }
    Ok(out)
}
