use clap::Parser;
use eframe_entrypoints::parse_args_or_exit;
use fun_fact_lib::{
    CatalogSource, CompletionService, Coordinate, DEFAULT_ZOOM, FactParams, FixedLocation,
    IpLocation, LocationProvider, NoLocation, OpenAiCompletions, UnavailableCompletions,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Credentials baked in at build time, overridable at runtime
const BUILD_API_KEY: Option<&str> = option_env!("OPENAI_API_KEY");
const BUILD_MAP_TOKEN: Option<&str> = option_env!("MAPBOX_ACCESS_TOKEN");

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Fun Fact Map - pick a place on the map and learn a fun fact about it
pub struct Settings {
    /// Points-of-interest catalog (JSON); the bundled catalog is used when omitted
    #[clap(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// API key for the completion service
    #[clap(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Access token for Mapbox tiles (OpenStreetMap is used without one)
    #[clap(long, env = "MAPBOX_ACCESS_TOKEN", hide_env_values = true)]
    pub map_token: Option<String>,

    /// Base URL of the OpenAI-compatible completion API
    #[clap(long, default_value = "https://api.openai.com/v1")]
    pub completion_url: String,

    /// Completion model
    #[clap(long, default_value = "gpt-4")]
    pub model: String,

    /// Maximum length of a fun fact in tokens
    #[clap(long, default_value = "100")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[clap(long, default_value = "0.7")]
    pub temperature: f64,

    /// Network timeout in seconds (0 = library default)
    #[clap(long, default_value = "30")]
    pub timeout_secs: u64,

    /// Map zoom level for the camera
    #[clap(long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: f64,

    /// Use this latitude as the user position instead of a lookup
    #[clap(long, requires = "longitude", allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Use this longitude as the user position instead of a lookup
    #[clap(long, requires = "latitude", allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Do not look up the position from the IP address
    #[clap(long, default_value = "false")]
    pub no_ip_location: bool,
}

impl Settings {
    /// Parse from the command line, exiting on `--help` or invalid input
    pub fn from_cli() -> Self {
        parse_args_or_exit::<Settings>()
    }

    /// API key from the command line/environment, else the one baked in at build time
    pub fn api_key(&self) -> String {
        non_empty(self.api_key.as_deref())
            .or_else(|| non_empty(BUILD_API_KEY))
            .unwrap_or_default()
    }

    /// Mapbox token, if any
    pub fn map_token(&self) -> Option<String> {
        non_empty(self.map_token.as_deref()).or_else(|| non_empty(BUILD_MAP_TOKEN))
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn fact_params(&self) -> FactParams {
        FactParams {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    pub fn catalog_source(&self) -> CatalogSource {
        match &self.catalog {
            Some(path) => CatalogSource::File(path.clone()),
            None => CatalogSource::Bundled,
        }
    }

    /// Fixed position if given, else IP lookup unless disabled
    pub fn location_provider(&self) -> Arc<dyn LocationProvider> {
        if let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) {
            return Arc::new(FixedLocation(Coordinate::new(longitude, latitude)));
        }
        if self.no_ip_location {
            return Arc::new(NoLocation);
        }

        match IpLocation::new(self.timeout()) {
            Ok(provider) => Arc::new(provider),
            Err(e) => {
                tracing::error!("Failed to create location client: {}", e);
                Arc::new(NoLocation)
            }
        }
    }

    pub fn completion_service(&self) -> Arc<dyn CompletionService> {
        let api_key = self.api_key();
        if api_key.is_empty() {
            tracing::warn!("No completion API key configured; fun facts will fail");
        }

        match OpenAiCompletions::with_base_url(api_key, &self.completion_url, self.timeout()) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                tracing::error!("Failed to create completion client: {}", e);
                Arc::new(UnavailableCompletions::new(e.to_string()))
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
