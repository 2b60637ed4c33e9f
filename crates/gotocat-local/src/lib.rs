use gotocat_core::{Error, ProbeBackend, ProbeRequest, ProbeResponse, Result};
use std::time::Duration;

pub mod candidates;
pub mod engine;
pub mod google;
pub mod store;
pub mod verify;
pub mod vocab;

pub use candidates::generate_candidates;
pub use engine::{reset_all, reset_domain, take_notification, try_redirect, RecordingNavigator};
pub use store::{FsStore, MemoryStore};
pub use verify::{classify, classify_response, verify};

/// reqwest-backed [`ProbeBackend`].
#[derive(Debug, Clone)]
pub struct LocalProber {
    client: reqwest::Client,
}

/// Overall per-probe timeout used by [`LocalProber::new`].
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

impl LocalProber {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_PROBE_TIMEOUT)
    }

    /// `timeout` bounds the whole probe (connect, redirects and body).
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("gotocat/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Probe(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl ProbeBackend for LocalProber {
    async fn probe(&self, req: &ProbeRequest) -> Result<ProbeResponse> {
        let url = url::Url::parse(&req.url).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Probe(e.to_string()))?;
        let final_url = resp.url().to_string();
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let max_bytes = req.max_bytes.unwrap_or(u64::MAX) as usize;
        let mut truncated = false;
        let mut body = Vec::new();
        let mut stream = resp.bytes_stream();
        use futures_util::StreamExt;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Probe(e.to_string()))?;
            if body.len().saturating_add(chunk.len()) > max_bytes {
                let can_take = max_bytes.saturating_sub(body.len());
                body.extend_from_slice(&chunk[..can_take]);
                truncated = true;
                break;
            }
            body.extend_from_slice(&chunk);
        }

        Ok(ProbeResponse {
            url: req.url.clone(),
            final_url,
            status,
            content_type,
            body,
            truncated,
        })
    }
}
