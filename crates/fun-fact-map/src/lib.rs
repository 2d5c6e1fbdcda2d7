//! Fun Fact Map - Application Library
//!
//! The egui shell around `fun-fact-lib`: a full-screen map, a "Surprise me!"
//! button, a callout with the selected place and its fun fact, and a sidebar
//! for picking places by hand.

mod app;

pub use app::FunFactMapApp;

// Define all platform entry points using the unified macro
eframe_entrypoints::eframe_app!("Fun Fact Map", |cc| Box::new(FunFactMapApp::new(cc)));
