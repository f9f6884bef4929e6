use gateway::config::LogFormat;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset: gateway events at info, framework and
/// HTTP client internals only when they warn.
const DEFAULT_FILTER: &str = "info,actix_server=warn,reqwest=warn,hyper=warn,hyper_util=warn";

pub fn init_tracing(format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false);

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        // Spans are flattened so `trace_id`, `method` and `path` sit beside
        // the event fields.
        LogFormat::Json => registry
            .with(fmt_layer.json().flatten_event(true).with_current_span(true))
            .init(),
        LogFormat::Text => registry.with(fmt_layer.compact()).init(),
    }
}
