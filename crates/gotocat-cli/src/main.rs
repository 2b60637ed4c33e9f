use anyhow::Result;
use clap::{Parser, Subcommand};
use gotocat_core::{Candidate, KvStore, PageContext, Strategy};
use gotocat_local::{google, FsStore, LocalProber, RecordingNavigator};
use std::path::PathBuf;
use std::time::Duration;

mod settings;

const BANNER: &str = "GoToCat Redirected ✖";

#[derive(Parser, Debug)]
#[command(name = "gotocat")]
#[command(about = "Find and follow the target-language version of a URL", long_about = None)]
struct Cli {
    /// Language config (json). Missing fields fall back to the Catalan defaults.
    #[arg(long, global = true, env = "GOTOCAT_CONFIG")]
    config: Option<PathBuf>,
    /// Override the target language code from the config.
    #[arg(long, global = true, env = "GOTOCAT_TARGET_LANG")]
    target_lang: Option<String>,
    /// Persistent state file (json). Default: <data dir>/gotocat/state.json
    #[arg(long, global = true, env = "GOTOCAT_STORE")]
    store: Option<PathBuf>,
    /// Overall timeout for each candidate probe, in milliseconds.
    #[arg(long, global = true, env = "GOTOCAT_TIMEOUT_MS", default_value_t = 30_000)]
    timeout_ms: u64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the ordered candidate URLs for a page (no network).
    Candidates(CandidatesCmd),
    /// Probe one URL and print its verdict.
    Verify(VerifyCmd),
    /// Run a full redirect attempt for a page, updating the persisted state.
    Redirect(RedirectCmd),
    /// Consume the one-shot notify flag (what a page-load handler does).
    Notify(OutputArgs),
    /// Clear persisted state.
    Reset(ResetCmd),
    /// Print Google search language filter links (lr=lang_<code>).
    GoogleFilters(GoogleFiltersCmd),
    /// Print the effective language config.
    Config(OutputArgs),
    /// Diagnose configuration/store issues (json).
    Doctor(OutputArgs),
    /// Print version info.
    Version(OutputArgs),
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Output format: json|text
    #[arg(long = "output", alias = "format", default_value = "json")]
    output: String,
}

impl OutputArgs {
    fn is_text(&self) -> bool {
        self.output.eq_ignore_ascii_case("text")
    }
}

#[derive(clap::Args, Debug)]
struct CandidatesCmd {
    url: String,
    #[command(flatten)]
    out: OutputArgs,
}

#[derive(clap::Args, Debug)]
struct VerifyCmd {
    url: String,
    /// Treat the URL as a query-parameter candidate for this parameter (requires a keyword hit).
    #[arg(long)]
    param: Option<String>,
    #[command(flatten)]
    out: OutputArgs,
}

#[derive(clap::Args, Debug)]
struct RedirectCmd {
    url: String,
    /// Pretend the page is a nested frame (the engine refuses to redirect).
    #[arg(long, action = clap::ArgAction::SetTrue)]
    frame: bool,
    #[command(flatten)]
    out: OutputArgs,
}

#[derive(clap::Args, Debug)]
struct ResetCmd {
    /// Forget the redirect flag of this host.
    #[arg(long, conflicts_with = "all")]
    domain: Option<String>,
    /// Drop every gotocat key (redirect flags and the notify flag).
    #[arg(long, action = clap::ArgAction::SetTrue)]
    all: bool,
    #[command(flatten)]
    out: OutputArgs,
}

#[derive(clap::Args, Debug)]
struct GoogleFiltersCmd {
    url: String,
    /// Comma-separated language codes.
    #[arg(long, default_value = "ca,es,en,sv")]
    langs: String,
    #[command(flatten)]
    out: OutputArgs,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    // stdout carries results; logs go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn envelope(kind: &str, ok: bool, mut body: serde_json::Value) -> serde_json::Value {
    let mut v = serde_json::json!({
        "schema_version": 1,
        "kind": kind,
        "ok": ok,
    });
    if let (Some(dst), Some(src)) = (v.as_object_mut(), body.as_object_mut()) {
        dst.append(src);
    }
    v
}

#[tokio::main]
async fn main() -> Result<()> {
    settings::load_env_file();
    init_tracing();

    let cli = Cli::parse();
    let cfg = settings::load_config(cli.config.as_deref(), cli.target_lang.as_deref())?;
    let store_path = settings::store_path(cli.store.clone());
    let probe_timeout = Duration::from_millis(cli.timeout_ms.max(1));
    tracing::debug!(target_lang = %cfg.code, store = %store_path.display(), "settings loaded");

    match cli.command {
        Commands::Candidates(args) => {
            let cands = gotocat_local::generate_candidates(&args.url, &cfg);
            if args.out.is_text() {
                for c in &cands {
                    println!("{}", c.url);
                }
            } else {
                let v = envelope(
                    "candidates",
                    true,
                    serde_json::json!({ "url": args.url, "candidates": cands }),
                );
                println!("{v}");
            }
        }
        Commands::Verify(args) => {
            let prober = LocalProber::with_timeout(probe_timeout)?;
            let strategy = match args.param {
                Some(name) => Strategy::QueryParam { name },
                None => Strategy::Substitution,
            };
            let candidate = Candidate::new(args.url, strategy);
            let verdict = gotocat_local::classify(&prober, &candidate, &cfg).await;
            if args.out.is_text() {
                let word = if verdict.is_accepted() { "accepted" } else { "rejected" };
                println!("{word} {}", candidate.url);
            } else {
                let v = envelope(
                    "verify",
                    true,
                    serde_json::json!({
                        "accepted": verdict.is_accepted(),
                        "candidate": candidate,
                        "result": verdict,
                    }),
                );
                println!("{v}");
            }
        }
        Commands::Redirect(args) => {
            let prober = LocalProber::with_timeout(probe_timeout)?;
            let store = FsStore::new(store_path);
            let nav = RecordingNavigator::new();
            let page = PageContext {
                url: args.url.clone(),
                top_level: !args.frame,
            };
            let outcome = gotocat_local::try_redirect(&page, &cfg, &prober, &store, &nav).await;
            if args.out.is_text() {
                match outcome.redirected_to() {
                    Some(url) => println!("{url}"),
                    None => println!("{}", args.url),
                }
            } else {
                let v = envelope(
                    "redirect",
                    true,
                    serde_json::json!({
                        "url": args.url,
                        "navigated_to": nav.visits().first(),
                        "result": outcome,
                    }),
                );
                println!("{v}");
            }
        }
        Commands::Notify(out) => {
            let store = FsStore::new(store_path);
            let show = gotocat_local::take_notification(&store).await?;
            if out.is_text() {
                if show {
                    println!("{BANNER}");
                }
            } else {
                let v = envelope(
                    "notify",
                    true,
                    serde_json::json!({
                        "show": show,
                        "message": if show { BANNER } else { "" },
                    }),
                );
                println!("{v}");
            }
        }
        Commands::Reset(args) => {
            let store = FsStore::new(store_path);
            let removed = match (&args.domain, args.all) {
                (Some(domain), _) => {
                    let key = gotocat_core::redirected_key(domain);
                    let present = store.get(&key).await?.is_some();
                    gotocat_local::reset_domain(&store, domain).await?;
                    if present {
                        vec![key]
                    } else {
                        Vec::new()
                    }
                }
                (None, true) => gotocat_local::reset_all(&store).await?,
                (None, false) => anyhow::bail!("reset needs --domain <host> or --all"),
            };
            if args.out.is_text() {
                for k in &removed {
                    println!("{k}");
                }
            } else {
                let v = envelope("reset", true, serde_json::json!({ "removed": removed }));
                println!("{v}");
            }
        }
        Commands::GoogleFilters(args) => {
            let langs: Vec<String> = args
                .langs
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            let links = google::google_language_filter_links(&args.url, &langs)?;
            if args.out.is_text() {
                for l in &links {
                    println!("{}\t{}", l.lang, l.url);
                }
            } else {
                let v = envelope("google_filters", true, serde_json::json!({ "links": links }));
                println!("{v}");
            }
        }
        Commands::Config(out) => {
            if out.is_text() {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else {
                let v = envelope("config", true, serde_json::json!({ "config": cfg }));
                println!("{v}");
            }
        }
        Commands::Doctor(out) => {
            let t0 = std::time::Instant::now();
            let mut checks: Vec<serde_json::Value> = Vec::new();

            // Check: the store file can be read and written.
            let store = FsStore::new(store_path.clone());
            let probe_key = "gotocat_doctor_probe";
            let store_ok = async {
                store.keys().await?;
                store.set(probe_key, serde_json::Value::Bool(true)).await?;
                store.remove(probe_key).await
            }
            .await;
            checks.push(serde_json::json!({
                "name": "store_writable",
                "ok": store_ok.is_ok(),
                "error": store_ok.as_ref().err().map(|e| e.to_string()),
                "hint": if store_ok.is_ok() { "" } else { "Set GOTOCAT_STORE to a writable file path." },
            }));

            let prober_ok = LocalProber::with_timeout(probe_timeout);
            checks.push(serde_json::json!({
                "name": "http_client",
                "ok": prober_ok.is_ok(),
                "error": prober_ok.as_ref().err().map(|e| e.to_string()),
            }));

            let ok = checks.iter().all(|c| c["ok"].as_bool() == Some(true));
            if out.is_text() {
                for c in &checks {
                    let name = c["name"].as_str().unwrap_or("");
                    let pass = c["ok"].as_bool() == Some(true);
                    println!("- {}: {}", name, if pass { "ok" } else { "fail" });
                }
            } else {
                let v = envelope(
                    "doctor",
                    ok,
                    serde_json::json!({
                        "name": "gotocat",
                        "version": env!("CARGO_PKG_VERSION"),
                        "elapsed_ms": t0.elapsed().as_millis() as u64,
                        "configured": {
                            "target_lang": cfg.code,
                            "timeout_ms": cli.timeout_ms,
                            "store": store_path.display().to_string(),
                        },
                        "checks": checks,
                    }),
                );
                println!("{v}");
            }
        }
        Commands::Version(out) => {
            if out.is_text() {
                println!("gotocat {}", env!("CARGO_PKG_VERSION"));
            } else {
                let v = envelope(
                    "version",
                    true,
                    serde_json::json!({
                        "name": "gotocat",
                        "version": env!("CARGO_PKG_VERSION"),
                    }),
                );
                println!("{v}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "gotocat",
            "candidates",
            "https://example.com/es/",
            "--target-lang",
            "gl",
            "--output",
            "text",
        ])
        .unwrap();
        assert_eq!(cli.target_lang.as_deref(), Some("gl"));
        let Commands::Candidates(args) = cli.command else {
            panic!("expected candidates");
        };
        assert!(args.out.is_text());
    }

    #[test]
    fn reset_domain_conflicts_with_all() {
        let r = Cli::try_parse_from(["gotocat", "reset", "--domain", "a.com", "--all"]);
        assert!(r.is_err());
    }

    #[test]
    fn envelope_merges_body() {
        let v = envelope("x", true, serde_json::json!({ "a": 1 }));
        assert_eq!(v["schema_version"], 1);
        assert_eq!(v["kind"], "x");
        assert_eq!(v["ok"], true);
        assert_eq!(v["a"], 1);
    }
}
