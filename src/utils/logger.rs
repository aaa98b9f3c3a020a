use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "hotel_booking=info";
const VERBOSE_FILTER: &str = "hotel_booking=debug,info";

/// RUST_LOG 優先，沒設定才用預設
fn booking_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(booking_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// One JSON object per line, event fields at the top level.
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(booking_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .json()
                .flatten_event(true)
                .with_current_span(false),
        )
        .init();
}
