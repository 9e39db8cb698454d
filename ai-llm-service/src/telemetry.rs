use std::io::{self, IsTerminal};

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Target prefixes of the workspace crates whose events this layer renders.
pub const TARGET_PREFIXES: [&str; 5] = [
    "ai_llm_service",
    "rag_base",
    "contextor",
    "api",
    "contract_genie",
];

/// RFC3339 UTC timer via `chrono`, e.g. `2026-10-17T10:20:30Z`.
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        w.write_str(&now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
    }
}

fn is_own_target(target: &str) -> bool {
    TARGET_PREFIXES.iter().any(|p| target.starts_with(p))
}

/// Formatting layer that renders only events emitted by the workspace crates.
///
/// Compact single-line output with RFC3339 UTC timestamps, `file:line`,
/// span-close durations, and ANSI colors only on a terminal. Events from
/// dependencies (hyper, reqwest, ...) are dropped by a per-layer filter, so
/// the layer composes with any global subscriber.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stdout().is_terminal();
    let only_ours = filter::filter_fn(|meta| is_own_target(meta.target()));

    fmt::layer()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(fmt::format().compact().with_source_location(true))
        .with_filter(only_ours)
}

/// Per-crate level directives, e.g. `rag_base=debug`.
pub fn level_directives(level: Level) -> Vec<Directive> {
    let lvl = level.as_str().to_lowercase();
    TARGET_PREFIXES
        .iter()
        .filter_map(|p| format!("{p}={lvl}").parse::<Directive>().ok())
        .collect()
}

/// `EnvFilter` from `RUST_LOG` (or `default`), with `level` applied to the
/// workspace crates.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    level_directives(level)
        .into_iter()
        .fold(base, |f, d| f.add_directive(d))
}
