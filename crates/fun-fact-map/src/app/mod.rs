//! Application module
//!
//! This module provides the main application structure:
//! - Full-screen map centered on the user or the selected place
//! - Clickable dots for every place and a marker on the selection
//! - Callout with the fun fact and a "Surprise me!" button
//! - Toggleable sidebar with tabs (Places and Settings)
//! - Responsive layout (sidebar from bottom on portrait displays)

mod plugin;
pub(crate) mod settings;
mod state;
mod tiles;
mod ui_panels;

use crate::app::plugin::{ClickedPlace, PlacesPlugin};
use crate::app::settings::Settings;
use crate::app::state::{TilesProvider, UiState};
use crate::app::tiles::{MapboxStreets, OpenTopoMap};
use eframe::egui;
use fun_fact_lib::{Camera, Session, UpdateCallback, presenter};
use std::sync::{Arc, Mutex};
use walkers::{HttpTiles, Map, MapMemory, sources::OpenStreetMap};

/// Main application structure
pub struct FunFactMapApp {
    /// Catalog, selection and fun-fact requests
    session: Session,

    ui: UiState,

    tiles_osm: HttpTiles,
    tiles_otm: HttpTiles,
    /// Only present when a Mapbox token is configured
    tiles_mapbox: Option<HttpTiles>,

    /// Map state (camera position, zoom, etc.)
    map_memory: MapMemory,

    /// Camera last applied to `map_memory`; the map is only moved when it changes
    last_camera: Option<Camera>,

    /// Written by the map plugin when a place dot is clicked
    clicked_place: ClickedPlace,

    /// Runtime owned by the app when it was started outside of one
    _runtime: Option<tokio::runtime::Runtime>,
}

impl FunFactMapApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = Settings::from_cli();

        let (runtime, handle) = match tokio::runtime::Handle::try_current() {
            Ok(handle) => (None, handle),
            Err(_) => {
                tracing::warn!("No async runtime entered, starting one for the app");
                match tokio::runtime::Runtime::new() {
                    Ok(runtime) => {
                        let handle = runtime.handle().clone();
                        (Some(runtime), handle)
                    }
                    Err(e) => {
                        // Nothing can be fetched without a runtime
                        tracing::error!("Failed to create Tokio runtime: {}", e);
                        std::process::exit(1);
                    }
                }
            }
        };

        let repaint_ctx = cc.egui_ctx.clone();
        let on_update: UpdateCallback = Arc::new(move || repaint_ctx.request_repaint());

        let mut session = Session::new(
            handle,
            settings.catalog_source(),
            settings.completion_service(),
            settings.location_provider(),
            settings.fact_params(),
        )
        .with_update_callback(on_update);
        session.start();

        let map_token = settings.map_token();
        let tiles_mapbox = map_token
            .as_ref()
            .map(|token| HttpTiles::new(MapboxStreets::new(token.clone()), cc.egui_ctx.clone()));

        tracing::info!(
            "Initialized (tiles: {}, zoom: {})",
            if tiles_mapbox.is_some() {
                "Mapbox"
            } else {
                "OpenStreetMap"
            },
            settings.zoom
        );

        Self {
            session,
            ui: UiState::new(map_token.is_some(), settings.zoom),
            tiles_osm: HttpTiles::new(OpenStreetMap, cc.egui_ctx.clone()),
            tiles_otm: HttpTiles::new(OpenTopoMap, cc.egui_ctx.clone()),
            tiles_mapbox,
            map_memory: MapMemory::default(),
            last_camera: None,
            clicked_place: Arc::new(Mutex::new(None)),
            _runtime: runtime,
        }
    }

    /// Move the map to the presenter's camera if it changed since the last frame
    fn follow_camera(&mut self) {
        let camera = presenter::camera(self.session.state(), self.ui.zoom);
        if self.last_camera == Some(camera) {
            return;
        }

        self.map_memory.center_at(walkers::lat_lon(
            camera.center.latitude,
            camera.center.longitude,
        ));
        if self.map_memory.set_zoom(camera.zoom).is_err() {
            tracing::warn!("Invalid zoom level {}", camera.zoom);
        }
        tracing::trace!(
            "Camera moved to ({:.4}, {:.4}) zoom {:.1}",
            camera.center.latitude,
            camera.center.longitude,
            camera.zoom
        );
        self.last_camera = Some(camera);
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let (surprise, fetch) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::F),
            )
        });
        if surprise {
            self.session.select_random();
        }
        if fetch {
            self.session.fetch_fun_fact();
        }
    }

    fn take_clicked_place(&self) -> Option<String> {
        self.clicked_place
            .lock()
            .ok()
            .and_then(|mut clicked| clicked.take())
    }
}

#[profiling::all_functions]
impl eframe::App for FunFactMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply results of finished background tasks
        self.session.poll();

        self.handle_keyboard(ctx);

        if let Some(id) = self.take_clicked_place() {
            self.session.select(&id);
        }

        ui_panels::render_sidebar(ctx, &mut self.ui, &mut self.session);
        ui_panels::notice_window(ctx, &mut self.session);

        self.follow_camera();

        let state = self.session.state();
        let places = state
            .catalog
            .iter()
            .map(|point| (point.id.clone(), point.coordinate()))
            .collect();
        let marker = presenter::marker(state);
        let user_position = state.user_position;
        let tiles_provider = self.ui.tiles_provider;
        let attribution_text = tiles_provider.attribution();
        let clicked_place = self.clicked_place.clone();

        // Central panel: Map view (full screen)
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                profiling::scope!("map_panel");

                let tiles: &mut HttpTiles = match (tiles_provider, self.tiles_mapbox.as_mut()) {
                    (TilesProvider::Mapbox, Some(tiles)) => tiles,
                    (TilesProvider::OpenTopoMap, _) => &mut self.tiles_otm,
                    _ => &mut self.tiles_osm,
                };

                let map = Map::new(
                    Some(tiles),
                    &mut self.map_memory,
                    walkers::lat_lon(user_position.latitude, user_position.longitude),
                )
                .with_plugin(PlacesPlugin::new(places, marker, clicked_place));

                ui.add(map);

                ui_panels::sidebar_toggle_button(ui, &mut self.ui);

                let painter = ui.painter();
                let screen_rect = ui.max_rect();
                painter.text(
                    screen_rect.center_bottom() + egui::vec2(0.0, -5.0),
                    egui::Align2::CENTER_BOTTOM,
                    attribution_text,
                    egui::FontId::proportional(10.0),
                    egui::Color32::from_black_alpha(180),
                );
            });

        ui_panels::selection_callout(ctx, &mut self.session);
        ui_panels::surprise_button(ctx, &mut self.session);

        // A click on the map is applied next frame
        if self
            .clicked_place
            .lock()
            .map(|clicked| clicked.is_some())
            .unwrap_or(false)
        {
            ctx.request_repaint();
        }
    }
}
