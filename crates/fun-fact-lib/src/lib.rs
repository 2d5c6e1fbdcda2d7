//! Fun Fact Library - Headless core of the Fun Fact Map application
//!
//! Everything the map screen needs that is not drawing: the point-of-interest
//! catalog, the user's position, the selection, fun-fact requests against a
//! hosted completion API, and the single store that ties them together.
//!
//! # Architecture
//!
//! - **[`Catalog`]**: Immutable, ordered list of [`PointOfInterest`] records
//! - **[`LocationProvider`]**: One-shot position fix (fixed, IP based, or none)
//! - **[`CompletionService`]**: Hosted text completion, with [`OpenAiCompletions`] over HTTP
//! - **[`SessionState`]**: Immutable-update state value, advanced by [`Action`]s
//! - **[`Session`]**: Spawns the async work and feeds results back into the store
//! - **[`presenter`]**: Camera and marker derived from the state

mod catalog;
mod completion;
mod facts;
mod location;
mod position;
pub mod presenter;
mod selection;
mod session;
mod store;

// Public API exports
pub use catalog::{Catalog, CatalogSource, PointOfInterest};
pub use completion::{
    Choice, CompletionRequest, CompletionResponse, CompletionService, OpenAiCompletions,
    UnavailableCompletions,
};
pub use facts::{FALLBACK_FUN_FACT, FactParams, fact_text, fun_fact_prompt};
pub use location::{FixedLocation, IpLocation, LocationProvider, NoLocation};
pub use position::{Coordinate, DEFAULT_USER_POSITION};
pub use presenter::{Camera, DEFAULT_ZOOM, Marker};
pub use selection::random_index;
pub use session::{Session, UpdateCallback};
pub use store::{Action, FunFact, Notice, NoticeKind, SessionState, StartupStatus, Store};

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status_code} - {message}")]
    Api { status_code: u16, message: String },

    #[error("Missing API key")]
    MissingApiKey,

    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

pub type Result<T> = std::result::Result<T, Error>;
