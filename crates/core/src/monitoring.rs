use metrics::counter;
use tracing::info;

/// Env var that disables the Prometheus listener (used by tests).
pub const NO_METRICS_ENV: &str = "ARCADE_CALC_NO_METRICS";

/// Log target of the `arcade-calc` binary (hyphens become underscores).
pub const BIN_TARGET: &str = "arcade_calc";

pub const DEFAULT_FILTER: &str = "arcade_calc=info,arcade_calculator_core=info,tower_http=info";
pub const DEBUG_FILTER: &str = "arcade_calc=debug,arcade_calculator_core=debug,tower_http=debug";

/// Human-oriented logs on stderr, filtered by `RUST_LOG` when set.
pub fn init_tracing(debug: bool) {
    let fallback = if debug { DEBUG_FILTER } else { DEFAULT_FILTER };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(debug)
        .with_line_number(debug)
        .try_init();
}

/// Errors only, so stdout can carry machine-readable JSON.
pub fn init_tracing_json() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from("error"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .try_init();
}

/// Install the Prometheus exporter unless disabled via [`NO_METRICS_ENV`].
pub fn init_metrics_exporter(port: u16) -> anyhow::Result<()> {
    if std::env::var(NO_METRICS_ENV).is_ok() {
        return Ok(());
    }
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()?;
    info!("Metrics endpoint available at http://localhost:{port}/metrics");
    Ok(())
}

/// `kind` is "profile" or "catalog".
pub fn record_fetch(kind: &'static str, success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!("arcade_calculator_fetches_total", "kind" => kind, "outcome" => outcome)
        .increment(1);
}

pub fn record_cache(hit: bool) {
    if hit {
        counter!("arcade_calculator_cache_hits_total").increment(1);
    } else {
        counter!("arcade_calculator_cache_misses_total").increment(1);
    }
}

pub fn record_request(kind: &'static str, success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!("arcade_calculator_requests_total", "kind" => kind, "outcome" => outcome)
        .increment(1);
}
