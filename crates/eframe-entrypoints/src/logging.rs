/*!
Logging setup for native builds.

`RUST_LOG` wins when set. Otherwise debug builds log at `debug` and release
builds at `info`, with the chattier UI and networking crates turned down.
*/

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const DEBUG_FILTER: &str = "debug,eframe::native=warn,egui::context=warn,wgpu_core=warn,wgpu_hal=warn,naga=warn,hyper_util=info,reqwest::connect=info,walkers=info";
const RELEASE_FILTER: &str = "info,eframe::native=warn,egui::context=warn,wgpu_core=warn,wgpu_hal=warn";

/// Default filter directives for this build
pub fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        DEBUG_FILTER
    } else {
        RELEASE_FILTER
    }
}

/// Install the global `tracing` subscriber (fmt layer + env filter).
///
/// Safe to call more than once; only the first call installs anything.
pub fn setup_logging() {
    let from_env = EnvFilter::try_from_default_env();
    let using_default = from_env.is_err();
    let filter = from_env.unwrap_or_else(|_| EnvFilter::new(default_filter()));

    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter);
    if tracing_subscriber::registry().with(fmt_layer).try_init().is_err() {
        return;
    }

    if using_default {
        tracing::info!("RUST_LOG not set, using default: {}", default_filter());
    }
    if cfg!(feature = "profiling") {
        tracing::info!("Profiling scopes are emitted as tracing spans");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEBUG_FILTER).is_ok());
        assert!(EnvFilter::try_new(RELEASE_FILTER).is_ok());
    }

    #[test]
    fn test_setup_twice_is_harmless() {
        setup_logging();
        setup_logging();
    }
}
