//! Redirect orchestration: generate, verify in order, persist, navigate.

use crate::candidates::generate_candidates;
use crate::verify::classify;
use gotocat_core::{
    get_or, redirected_key, CandidateReport, KvStore, LangConfig, Navigator, PageContext,
    ProbeBackend, RedirectOutcome, Result, NOTIFY_KEY, REDIRECTED_KEY_PREFIX,
};
use serde_json::Value;
use std::sync::Mutex;

/// Run one redirect attempt for `page`.
///
/// Candidates are probed strictly one after another and the first accepted one wins, so at most
/// one navigation happens. On success the notify flag and the per-domain flag are written in a
/// single `set_many` before navigating. Storage failures are logged, never returned.
pub async fn try_redirect(
    page: &PageContext,
    cfg: &LangConfig,
    prober: &dyn ProbeBackend,
    store: &dyn KvStore,
    navigator: &dyn Navigator,
) -> RedirectOutcome {
    if !page.top_level {
        tracing::debug!(url = %page.url, "nested frame; not redirecting");
        return RedirectOutcome::NestedFrame;
    }
    let domain = match page.hostname() {
        Ok(d) => d,
        Err(e) => {
            return RedirectOutcome::InvalidPage {
                error: e.to_string(),
            }
        }
    };

    let key = redirected_key(&domain);
    match get_or(store, &key, false).await {
        Ok(true) => return RedirectOutcome::AlreadyRedirected { domain },
        Ok(false) => {}
        Err(e) => tracing::warn!(%domain, error = %e, "could not read redirect flag"),
    }

    let candidates = generate_candidates(&page.url, cfg);
    if candidates.is_empty() {
        return RedirectOutcome::NoCandidates;
    }

    let mut tried = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let verdict = classify(prober, &candidate, cfg).await;
        let accepted = verdict.is_accepted();
        tried.push(CandidateReport { candidate, verdict });
        if !accepted {
            continue;
        }

        let url = tried[tried.len() - 1].candidate.url.clone();
        let flags = [
            (NOTIFY_KEY.to_string(), Value::Bool(true)),
            (key.clone(), Value::Bool(true)),
        ];
        if let Err(e) = store.set_many(&flags).await {
            tracing::warn!(%domain, error = %e, "could not persist redirect flags");
        }
        tracing::info!(from = %page.url, to = %url, "redirecting");
        navigator.assign(&url);
        return RedirectOutcome::Redirected { url, tried };
    }

    tracing::debug!(url = %page.url, tried = tried.len(), "no candidate accepted");
    RedirectOutcome::NoneAccepted { tried }
}

/// Consume the one-shot notify flag. True means "show the banner now".
pub async fn take_notification(store: &dyn KvStore) -> Result<bool> {
    if !get_or(store, NOTIFY_KEY, false).await? {
        return Ok(false);
    }
    store.set(NOTIFY_KEY, Value::Bool(false)).await?;
    Ok(true)
}

/// Forget that `domain` was redirected.
pub async fn reset_domain(store: &dyn KvStore, domain: &str) -> Result<()> {
    store.remove(&redirected_key(domain)).await
}

/// Drop every gotocat key. Returns the removed keys.
pub async fn reset_all(store: &dyn KvStore) -> Result<Vec<String>> {
    let mut removed = Vec::new();
    for k in store.keys().await? {
        if k == NOTIFY_KEY || k.starts_with(REDIRECTED_KEY_PREFIX) {
            store.remove(&k).await?;
            removed.push(k);
        }
    }
    Ok(removed)
}

/// Navigator that only records where it was sent.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn assign(&self, url: &str) {
        self.visits
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(url.to_string());
    }
}
