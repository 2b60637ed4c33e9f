use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("probe failed: {0}")]
    Probe(String),
    #[error("store error: {0}")]
    Store(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("not supported: {0}")]
    NotSupported(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Key of the one-shot "show the banner on the next page load" flag.
pub const NOTIFY_KEY: &str = "notify";

/// Prefix shared by every per-domain "already redirected" flag.
pub const REDIRECTED_KEY_PREFIX: &str = "gotocat_redirected_";

pub fn redirected_key(domain: &str) -> String {
    format!("{REDIRECTED_KEY_PREFIX}{}", domain.trim().to_ascii_lowercase())
}

/// Target language and the heuristics used to recognise it.
///
/// Built once per run and passed by reference into the engine; nothing mutates it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LangConfig {
    /// Code written into candidate URLs (`ca`).
    pub code: String,
    /// `<html lang>` values (primary subtags or full tags) that count as the target language.
    pub variants: Vec<String>,
    /// Longer URL tokens that already name the target language (`cat`, `catalan`).
    pub aliases: Vec<String>,
    /// Body keywords that make a candidate acceptable.
    pub keywords: Vec<String>,
    /// Body keywords that reject a candidate outright (homonym guards, e.g. "canada" on `/ca/`).
    pub rejections: Vec<String>,
    /// `<html lang>` values that reject a candidate outright.
    pub lang_rejections: Vec<String>,
    /// Query parameter names sites commonly use to select a language.
    pub query_params: Vec<String>,
}

impl Default for LangConfig {
    fn default() -> Self {
        fn owned(xs: &[&str]) -> Vec<String> {
            xs.iter().map(|s| s.to_string()).collect()
        }
        Self {
            code: "ca".to_string(),
            variants: owned(&["ca", "va"]),
            aliases: owned(&["cat", "catala", "catalan", "valencian"]),
            keywords: owned(&["català", "catalan", "generalitat", "ajuntament"]),
            rejections: owned(&["canada", "canadian", "canadien"]),
            lang_rejections: owned(&["en", "fr"]),
            query_params: owned(&["lang", "ln", "hl"]),
        }
    }
}

/// `ca`, `ca-es`, `es-419`: an alphanumeric primary subtag and at most one alphanumeric region.
fn is_valid_code(code: &str) -> bool {
    let alnum = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric());
    match code.split_once('-') {
        None => alnum(code),
        Some((primary, region)) => alnum(primary) && alnum(region),
    }
}

fn normalize_list(xs: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(xs.len());
    for x in xs {
        let x = x.trim().to_lowercase();
        if !x.is_empty() && !out.contains(&x) {
            out.push(x);
        }
    }
    out
}

impl LangConfig {
    /// Parse a JSON config. Missing fields fall back to the Catalan defaults, except that a
    /// config naming another code without listing variants (or aliases) does not inherit the
    /// Catalan ones.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let raw: serde_json::Value =
            serde_json::from_str(s).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        let has_variants = raw.get("variants").is_some();
        let has_aliases = raw.get("aliases").is_some();
        let mut cfg: Self =
            serde_json::from_value(raw).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        if !cfg.code.trim().eq_ignore_ascii_case(&Self::default().code) {
            if !has_variants {
                cfg.variants = vec![cfg.code.clone()];
            }
            if !has_aliases {
                cfg.aliases.clear();
            }
        }
        cfg.normalized()
    }

    /// Lowercase/trim every field, drop empties and duplicates, and check the target code.
    pub fn normalized(self) -> Result<Self> {
        let code = self.code.trim().to_ascii_lowercase();
        if code.is_empty() {
            return Err(Error::InvalidConfig("target code is empty".to_string()));
        }
        if !is_valid_code(&code) {
            return Err(Error::InvalidConfig(format!(
                "target code must be alphanumeric, optionally with one -region part: {code:?}"
            )));
        }
        let mut variants = normalize_list(&self.variants);
        if !variants.contains(&code) {
            variants.insert(0, code.clone());
        }
        Ok(Self {
            code,
            variants,
            aliases: normalize_list(&self.aliases),
            keywords: normalize_list(&self.keywords),
            rejections: normalize_list(&self.rejections),
            lang_rejections: normalize_list(&self.lang_rejections),
            query_params: normalize_list(&self.query_params),
        })
    }

    /// Same keyword heuristics, different target code.
    ///
    /// Variants and aliases belong to the old code, so a new code starts with itself as the only
    /// variant and no aliases.
    pub fn with_target(mut self, code: &str) -> Result<Self> {
        let code = code.trim().to_ascii_lowercase();
        if code != self.code {
            self.variants = vec![code.clone()];
            self.aliases.clear();
        }
        self.code = code;
        self.normalized()
    }

    /// True if `token` names the target language (the code, a variant or an alias).
    pub fn is_target_token(&self, token: &str) -> bool {
        let t = token.trim().to_lowercase();
        t == self.code || self.variants.contains(&t) || self.aliases.contains(&t)
    }
}

/// How a candidate URL was derived from the page URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// An existing language token was rewritten to the target code.
    Substitution,
    /// `/{code}` inserted as the first path segment.
    PathPrefix,
    /// `/{code}` appended to the path.
    PathSuffix,
    /// `{code}.` prepended to the host.
    Subdomain,
    /// A language query parameter set to the target code.
    QueryParam { name: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Candidate {
    pub url: String,
    pub strategy: Strategy,
}

impl Candidate {
    pub fn new(url: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            url: url.into(),
            strategy,
        }
    }
}

/// Why a verdict went the way it did.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reason {
    HttpStatus { status: u16 },
    LangAttribute { lang: String },
    NegativeKeyword { keyword: String },
    PositiveKeyword { keyword: String },
    NoPositiveKeyword,
    NoNegativeKeyword,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Accepted { reason: Reason },
    Rejected { reason: Reason },
    /// The probe itself failed; treated as a rejection.
    Inconclusive { error: String },
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeRequest {
    pub url: String,
    /// Hard cap on bytes read from the response body.
    pub max_bytes: Option<u64>,
}

impl ProbeRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_bytes: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResponse {
    pub url: String,
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
    pub truncated: bool,
}

impl ProbeResponse {
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

#[async_trait::async_trait]
pub trait ProbeBackend: Send + Sync {
    async fn probe(&self, req: &ProbeRequest) -> Result<ProbeResponse>;
}

/// Persistent key/value storage supplied by the host.
///
/// Values are JSON so callers can keep typed defaults (see [`get_or`]).
#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Write several keys as one unit.
    async fn set_many(&self, entries: &[(String, serde_json::Value)]) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;

    async fn keys(&self) -> Result<Vec<String>>;

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        self.set_many(&[(key.to_string(), value)]).await
    }
}

/// `get(key, default)`: a missing key yields `default`, a present key must decode as `T`.
pub async fn get_or<S, T>(store: &S, key: &str, default: T) -> Result<T>
where
    S: KvStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key).await? {
        None => Ok(default),
        Some(v) => serde_json::from_value(v)
            .map_err(|e| Error::Store(format!("value for {key:?} has unexpected type: {e}"))),
    }
}

/// Host navigation primitive (`location.href = url`).
pub trait Navigator: Send + Sync {
    fn assign(&self, url: &str);
}

/// The page the engine runs against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContext {
    pub url: String,
    /// False inside nested frames; the engine never redirects from there.
    pub top_level: bool,
}

impl PageContext {
    pub fn top_level(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            top_level: true,
        }
    }

    pub fn hostname(&self) -> Result<String> {
        let u = url::Url::parse(self.url.trim()).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        u.host_str()
            .map(|h| h.to_ascii_lowercase())
            .ok_or_else(|| Error::InvalidUrl(format!("no host in {}", self.url)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateReport {
    pub candidate: Candidate,
    pub verdict: Verdict,
}

/// Terminal state of one redirect attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RedirectOutcome {
    NestedFrame,
    InvalidPage { error: String },
    AlreadyRedirected { domain: String },
    NoCandidates,
    NoneAccepted { tried: Vec<CandidateReport> },
    Redirected {
        url: String,
        tried: Vec<CandidateReport>,
    },
}

impl RedirectOutcome {
    pub fn redirected_to(&self) -> Option<&str> {
        match self {
            RedirectOutcome::Redirected { url, .. } => Some(url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[test]
    fn default_config_is_catalan() {
        let cfg = LangConfig::default().normalized().unwrap();
        assert_eq!(cfg.code, "ca");
        assert!(cfg.is_target_token("CA"));
        assert!(cfg.is_target_token("va"));
        assert!(cfg.is_target_token("Catalan"));
        assert!(cfg.is_target_token("cat"));
        assert!(!cfg.is_target_token("es"));
    }

    #[test]
    fn normalized_lowercases_dedups_and_adds_code_to_variants() {
        let cfg = LangConfig {
            code: " EU ".to_string(),
            variants: vec!["eus".to_string(), "EUS".to_string(), "".to_string()],
            ..LangConfig::default()
        }
        .normalized()
        .unwrap();
        assert_eq!(cfg.code, "eu");
        assert_eq!(cfg.variants, vec!["eu".to_string(), "eus".to_string()]);
    }

    #[test]
    fn normalized_rejects_bad_codes() {
        for bad in ["", "  ", "c/a", "c a", "-", "ca-", "-es", "ca-es-x", "ca_es"] {
            let r = LangConfig::default().with_target(bad);
            assert!(matches!(r, Err(Error::InvalidConfig(_))), "{bad:?}");
        }
    }

    #[test]
    fn region_tagged_codes_are_valid() {
        for good in ["gl", "ast", "ca-ES", "es-419"] {
            let cfg = LangConfig::default().with_target(good).unwrap();
            assert_eq!(cfg.code, good.to_ascii_lowercase());
        }
    }

    #[test]
    fn from_json_fills_missing_fields_with_defaults() {
        let cfg = LangConfig::from_json_str(r#"{"code":"gl","keywords":["Galego"]}"#).unwrap();
        assert_eq!(cfg.code, "gl");
        assert_eq!(cfg.keywords, vec!["galego".to_string()]);
        assert_eq!(cfg.query_params, LangConfig::default().query_params);
        // Catalan variants do not leak into another language's config.
        assert_eq!(cfg.variants, vec!["gl".to_string()]);
        assert!(cfg.aliases.is_empty());
        assert!(!cfg.is_target_token("catalan"));
        let cfg = LangConfig::from_json_str(r#"{"keywords":["x"]}"#).unwrap();
        assert_eq!(cfg.variants, LangConfig::default().variants);
        assert!(LangConfig::from_json_str("{not json").is_err());
    }

    #[test]
    fn redirected_key_is_per_domain() {
        assert_eq!(redirected_key("Example.COM"), "gotocat_redirected_example.com");
    }

    #[test]
    fn verdict_serializes_with_tags() {
        let v = Verdict::Rejected {
            reason: Reason::HttpStatus { status: 404 },
        };
        let j = serde_json::to_value(&v).unwrap();
        assert_eq!(j["verdict"], "rejected");
        assert_eq!(j["reason"]["kind"], "http_status");
        assert_eq!(j["reason"]["status"], 404);
    }

    #[test]
    fn page_hostname() {
        let p = PageContext::top_level("https://WWW.Example.com:8080/a");
        assert_eq!(p.hostname().unwrap(), "www.example.com");
        assert!(PageContext::top_level("not a url").hostname().is_err());
    }

    struct MapStore(Mutex<BTreeMap<String, serde_json::Value>>);

    #[async_trait::async_trait]
    impl KvStore for MapStore {
        async fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }
        async fn set_many(&self, entries: &[(String, serde_json::Value)]) -> Result<()> {
            let mut m = self.0.lock().unwrap();
            for (k, v) in entries {
                m.insert(k.clone(), v.clone());
            }
            Ok(())
        }
        async fn remove(&self, key: &str) -> Result<()> {
            self.0.lock().unwrap().remove(key);
            Ok(())
        }
        async fn keys(&self) -> Result<Vec<String>> {
            Ok(self.0.lock().unwrap().keys().cloned().collect())
        }
    }

    #[tokio::test]
    async fn get_or_uses_default_and_checks_type() {
        let store = MapStore(Mutex::new(BTreeMap::new()));
        assert!(!get_or(&store, NOTIFY_KEY, false).await.unwrap());
        store.set(NOTIFY_KEY, serde_json::json!(true)).await.unwrap();
        assert!(get_or(&store, NOTIFY_KEY, false).await.unwrap());
        store.set(NOTIFY_KEY, serde_json::json!("yes")).await.unwrap();
        assert!(matches!(
            get_or(&store, NOTIFY_KEY, false).await,
            Err(Error::Store(_))
        ));
    }
}
