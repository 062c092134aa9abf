//! Resolve raw error text into a localized message.
//!
//! Usage:
//!   error-localizer [--lang <code>] [--report] [TEXT...]
//!
//! With TEXT, the arguments are joined with spaces and resolved once.
//! Without TEXT, every line on stdin is resolved.
//!
//! Required environment variables:
//! - ERROR_CATALOG_PATH
//!
//! Optional:
//! - ERROR_LANGUAGE (defaults to the catalog's first language)
//! - ERROR_FALLBACK_TO_RAW (defaults to true)

use anyhow::{bail, Context, Result};
use error_localizer::config::Config;
use error_localizer::{Catalog, TemplateRegistry};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

struct Args {
    language: Option<String>,
    report: bool,
    text: Vec<String>,
}

impl Args {
    fn parse() -> Result<Self> {
        let mut args = Args {
            language: None,
            report: false,
            text: Vec::new(),
        };

        let mut iter = std::env::args().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--lang" => {
                    args.language = Some(iter.next().context("--lang requires a language code")?);
                }
                "--report" => args.report = true,
                _ => args.text.push(arg),
            }
        }

        Ok(args)
    }
}

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging; stdout is reserved for resolved messages
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("error_localizer=info".parse()?),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse()?;
    let config = Config::from_env()?;

    let registry = Catalog::load(&config.catalog_path)
        .with_context(|| format!("Failed to load catalog {}", config.catalog_path.display()))?
        .into_registry()
        .context("Failed to register catalog templates")?;

    let language = match args.language.or(config.default_language.clone()) {
        Some(language) => language,
        None => match registry.languages().code(0) {
            Some(code) => code.to_string(),
            None => bail!("Catalog defines no languages"),
        },
    };
    registry.language_index(&language)?;
    info!("Resolving errors in {} with {} templates", language, registry.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0usize;

    if args.text.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read stdin")?;
            if !resolve_line(&registry, &config, &language, &line, &mut out)? {
                failures += 1;
            }
        }
    } else {
        let text = args.text.join(" ");
        if !resolve_line(&registry, &config, &language, &text, &mut out)? {
            failures += 1;
        }
    }

    if args.report {
        let report = serde_json::to_string_pretty(&registry.metrics().report())?;
        eprintln!("{}", report);
    }

    if failures > 0 && !config.fallback_to_raw {
        bail!("{} error(s) could not be localized", failures);
    }

    Ok(())
}

/// Print the localized message for one line; returns false on failure.
fn resolve_line(
    registry: &TemplateRegistry,
    config: &Config,
    language: &str,
    text: &str,
    out: &mut impl Write,
) -> Result<bool> {
    match registry.resolve(language, text) {
        Ok(message) => {
            writeln!(out, "{}", message)?;
            Ok(true)
        }
        Err(e) => {
            warn!("Could not localize '{}': {}", text, e);
            if config.fallback_to_raw {
                writeln!(out, "{}", text)?;
            }
            Ok(false)
        }
    }
}
