use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// JSON logs to stdout. `RUST_LOG` overrides the default filter;
/// `LOG_FORMAT=pretty` switches to human-readable output for local work.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,actix_web=info,sqlx=warn,sea_orm=warn"));

    let pretty = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("pretty"));

    let base = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    if pretty {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(base)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(base.with_ansi(false).json())
            .init();
    }
}
