//! Candidate verification: one probe, then a heuristic on status, `<html lang>` and keywords.

use gotocat_core::{
    Candidate, LangConfig, ProbeBackend, ProbeRequest, ProbeResponse, Reason, Strategy, Verdict,
};

/// Keyword scans never look past this many body bytes.
pub const DEFAULT_MAX_BODY_BYTES: u64 = 2 * 1024 * 1024;

/// Value of the root element's `lang` attribute, lowercased and trimmed.
pub fn declared_lang(html: &str) -> Option<String> {
    let doc = html_scraper::Html::parse_document(html);
    let lang = doc.root_element().value().attr("lang")?.trim().to_lowercase();
    (!lang.is_empty()).then_some(lang)
}

fn lang_matches(lang: &str, token: &str) -> bool {
    lang == token
        || lang
            .strip_prefix(token)
            .is_some_and(|rest| rest.starts_with('-') || rest.starts_with('_'))
}

/// `Some(true)` for a target variant, `Some(false)` for a rejected language, `None` otherwise.
///
/// Tags are compared from the primary subtag: `en-CA` is English, never Catalan.
fn lang_decision(lang: &str, cfg: &LangConfig) -> Option<bool> {
    if cfg.variants.iter().any(|v| lang_matches(lang, v)) {
        return Some(true);
    }
    if cfg.lang_rejections.iter().any(|r| lang_matches(lang, r)) {
        return Some(false);
    }
    None
}

fn keyword_verdict(body_lc: &str, strategy: &Strategy, cfg: &LangConfig) -> Verdict {
    if let Some(k) = cfg.rejections.iter().find(|k| body_lc.contains(k.as_str())) {
        return Verdict::Rejected {
            reason: Reason::NegativeKeyword { keyword: k.clone() },
        };
    }
    if let Some(k) = cfg.keywords.iter().find(|k| body_lc.contains(k.as_str())) {
        return Verdict::Accepted {
            reason: Reason::PositiveKeyword { keyword: k.clone() },
        };
    }
    match strategy {
        // Sites often ignore unknown parameters and answer 200 with the same page.
        Strategy::QueryParam { .. } => Verdict::Rejected {
            reason: Reason::NoPositiveKeyword,
        },
        _ => Verdict::Accepted {
            reason: Reason::NoNegativeKeyword,
        },
    }
}

/// Classify an already-fetched response. Pure; no IO.
pub fn classify_response(resp: &ProbeResponse, strategy: &Strategy, cfg: &LangConfig) -> Verdict {
    if resp.status >= 400 {
        return Verdict::Rejected {
            reason: Reason::HttpStatus {
                status: resp.status,
            },
        };
    }
    let body = resp.text_lossy();
    if let Some(lang) = declared_lang(&body) {
        match lang_decision(&lang, cfg) {
            Some(true) => {
                return Verdict::Accepted {
                    reason: Reason::LangAttribute { lang },
                }
            }
            Some(false) => {
                return Verdict::Rejected {
                    reason: Reason::LangAttribute { lang },
                }
            }
            None => {}
        }
    }
    keyword_verdict(&body.to_lowercase(), strategy, cfg)
}

/// Probe `candidate` and classify the result. Probe failures come back as `Inconclusive`.
pub async fn classify(
    prober: &dyn ProbeBackend,
    candidate: &Candidate,
    cfg: &LangConfig,
) -> Verdict {
    let req = ProbeRequest {
        max_bytes: Some(DEFAULT_MAX_BODY_BYTES),
        ..ProbeRequest::get(candidate.url.clone())
    };
    let verdict = match prober.probe(&req).await {
        Ok(resp) => classify_response(&resp, &candidate.strategy, cfg),
        Err(e) => Verdict::Inconclusive {
            error: e.to_string(),
        },
    };
    tracing::debug!(url = %candidate.url, ?verdict, "candidate verified");
    verdict
}

/// True only when the candidate is accepted.
pub async fn verify(prober: &dyn ProbeBackend, candidate: &Candidate, cfg: &LangConfig) -> bool {
    classify(prober, candidate, cfg).await.is_accepted()
}
