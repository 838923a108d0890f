use tracing_subscriber::EnvFilter;

/// The CLI and the generator library both log.
const TARGETS: [&str; 2] = ["suncal", "suncal_core"];

fn level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// e.g. "suncal=info,suncal_core=info" for `-v`
fn directives(verbosity: u8) -> String {
    let level = level(verbosity);
    TARGETS.map(|target| format!("{target}={level}")).join(",")
}

/// Send logs to stderr so stdout stays clean for `preview` output.
///
/// Skipped days are logged at warn, so they show even without `-v`.
/// `RUST_LOG` replaces the verbosity flag when set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .without_time()
        .init();
}
