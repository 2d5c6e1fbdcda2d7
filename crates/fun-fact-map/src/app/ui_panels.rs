//! UI panels for the application
//!
//! Overlays drawn on top of the map (callout, "Surprise me!" button, error
//! notices) and the responsive sidebar with the Places and Settings tabs.

use crate::app::state::{SidebarTab, TilesProvider, UiState};
use egui::{Color32, RichText, Ui};
use fun_fact_lib::{Coordinate, FunFact, Session, StartupStatus, presenter};

const ACCENT: Color32 = Color32::from_rgb(0x21, 0x96, 0xF3);

/// Render the sidebar toggle button (overlaid on top-right of map)
pub fn sidebar_toggle_button(ui: &mut Ui, ui_state: &mut UiState) {
    let button_size = egui::vec2(40.0, 40.0);
    let margin = 10.0;

    let rect = ui.max_rect();
    let button_pos = rect.right_top() + egui::vec2(-button_size.x - margin, margin);
    let button_rect = egui::Rect::from_min_size(button_pos, button_size);

    let response = ui.allocate_rect(button_rect, egui::Sense::click());
    if response.clicked() {
        ui_state.sidebar_open = !ui_state.sidebar_open;
    }

    let bg_color = if response.hovered() {
        ui.visuals().widgets.hovered.bg_fill
    } else {
        ui.visuals().widgets.inactive.bg_fill
    };
    ui.painter().rect_filled(button_rect, 5.0, bg_color);

    let icon = if ui_state.sidebar_open { "✕" } else { "☰" };
    ui.painter().text(
        button_rect.center(),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(20.0),
        ui.visuals().text_color(),
    );
}

/// Callout for the selected place: title, distance and the fun fact (or the
/// button to request one)
pub fn selection_callout(ctx: &egui::Context, session: &mut Session) {
    let state = session.state();
    let Some(point) = state.selection.clone() else {
        return;
    };
    let distance = presenter::distance_to_selection(state);
    let fun_fact = state.fun_fact.clone();
    let can_request = state.can_request_fact();

    egui::Area::new(egui::Id::new("selection_callout"))
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 60.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_max_width(320.0);

                ui.label(RichText::new(&point.title).heading().strong());
                let mut subtitle = point.category.clone();
                if let Some(meters) = distance {
                    subtitle.push_str(" · ");
                    subtitle.push_str(&Coordinate::format_distance(meters));
                    subtitle.push_str(" away");
                }
                ui.label(RichText::new(subtitle).small().weak());
                ui.add_space(6.0);

                match fun_fact {
                    FunFact::Ready(text) => {
                        ui.label(text);
                    }
                    FunFact::Pending { .. } => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(RichText::new("Asking the tour guide...").weak());
                        });
                    }
                    FunFact::Unset => {
                        if ui
                            .add_enabled(can_request, egui::Button::new("💡 Get Fun Fact"))
                            .clicked()
                        {
                            session.fetch_fun_fact();
                        }
                    }
                }
            });
        });
}

/// Large button at the bottom of the map that selects a random place
pub fn surprise_button(ctx: &egui::Context, session: &mut Session) {
    let enabled = !session.state().catalog.is_empty();

    egui::Area::new(egui::Id::new("surprise_button"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -40.0))
        .show(ctx, |ui| {
            let button = egui::Button::new(
                RichText::new("Surprise me!")
                    .size(18.0)
                    .strong()
                    .color(Color32::WHITE),
            )
            .fill(ACCENT)
            .corner_radius(25.0)
            .min_size(egui::vec2(200.0, 50.0));

            if ui.add_enabled(enabled, button).clicked() {
                session.select_random();
            }
        });
}

/// Modal window for the oldest undismissed notice
pub fn notice_window(ctx: &egui::Context, session: &mut Session) {
    let Some(notice) = session.state().notices.first().cloned() else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new(notice.title())
        .id(egui::Id::new("notice_window"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new(&notice.message).strong());
            if !notice.detail.is_empty() {
                ui.add_space(4.0);
                ui.label(RichText::new(&notice.detail).small().weak());
            }
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        session.dismiss_notice(0);
    }
}

/// Render the main sidebar (responsive: side on landscape, bottom on portrait)
pub fn render_sidebar(ctx: &egui::Context, ui_state: &mut UiState, session: &mut Session) {
    if !ui_state.sidebar_open {
        return;
    }

    let screen_size = ctx.viewport_rect().size();
    if screen_size.y > screen_size.x {
        egui::TopBottomPanel::bottom("main_sidebar")
            .default_height(280.0)
            .min_height(180.0)
            .max_height(ctx.viewport_rect().height() * 0.6)
            .resizable(true)
            .show(ctx, |ui| render_sidebar_content(ui, ui_state, session));
    } else {
        egui::SidePanel::right("main_sidebar")
            .default_width(300.0)
            .min_width(260.0)
            .max_width(450.0)
            .resizable(true)
            .show(ctx, |ui| render_sidebar_content(ui, ui_state, session));
    }
}

fn render_sidebar_content(ui: &mut Ui, ui_state: &mut UiState, session: &mut Session) {
    ui.horizontal(|ui| {
        ui.selectable_value(&mut ui_state.active_tab, SidebarTab::Places, "📍 Places");
        ui.selectable_value(&mut ui_state.active_tab, SidebarTab::Settings, "⚙ Settings");
    });

    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| match ui_state.active_tab {
            SidebarTab::Places => render_places_tab(ui, ui_state, session),
            SidebarTab::Settings => render_settings_tab(ui, ui_state, session),
        });
}

fn render_places_tab(ui: &mut Ui, ui_state: &mut UiState, session: &mut Session) {
    let catalog = session.state().catalog.clone();
    let selected_id = session
        .state()
        .selection
        .as_ref()
        .map(|point| point.id.clone());

    ui.horizontal(|ui| {
        if ui
            .add_enabled(!catalog.is_empty(), egui::Button::new("🎲 Surprise me!"))
            .clicked()
        {
            session.select_random();
        }
        if ui
            .add_enabled(
                session.state().can_request_fact(),
                egui::Button::new("💡 Get Fun Fact"),
            )
            .clicked()
        {
            session.fetch_fun_fact();
        }
    });

    ui.add_space(8.0);

    match session.state().catalog_status {
        StartupStatus::Pending => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading places...");
            });
            return;
        }
        StartupStatus::Failed => {
            ui.label(RichText::new("⚠ Places could not be loaded").color(Color32::RED));
            return;
        }
        StartupStatus::Done => {}
    }

    let selected_text = ui_state
        .category_filter
        .clone()
        .unwrap_or_else(|| "All".to_string());
    egui::ComboBox::from_label("Category")
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut ui_state.category_filter, None, "All");
            for category in catalog.categories() {
                ui.selectable_value(
                    &mut ui_state.category_filter,
                    Some(category.to_string()),
                    category,
                );
            }
        });

    ui.add_space(6.0);
    ui.separator();

    let user_position = session.state().user_position;
    let mut clicked = None;
    for point in catalog.iter().filter(|point| {
        ui_state
            .category_filter
            .as_deref()
            .is_none_or(|category| point.category == category)
    }) {
        let selected = selected_id.as_deref() == Some(point.id.as_str());
        ui.horizontal(|ui| {
            if ui.selectable_label(selected, &point.title).clicked() {
                clicked = Some(point.id.clone());
            }
            let distance = user_position.distance_to(&point.coordinate());
            ui.label(
                RichText::new(Coordinate::format_distance(distance))
                    .small()
                    .weak(),
            );
        });
    }

    if let Some(id) = clicked {
        session.select(&id);
    }
}

fn render_settings_tab(ui: &mut Ui, ui_state: &mut UiState, session: &Session) {
    ui.label(RichText::new("🗺 Map").strong());
    ui.add_space(6.0);

    for provider in TilesProvider::available(ui_state.mapbox_available) {
        let selected = ui_state.tiles_provider == provider;
        if ui.selectable_label(selected, provider.name()).clicked() {
            ui_state.tiles_provider = provider;
        }
    }
    ui.add_space(4.0);
    ui.label(
        RichText::new(ui_state.tiles_provider.attribution())
            .small()
            .italics()
            .weak(),
    );

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label("Zoom:");
        ui.add(egui::Slider::new(&mut ui_state.zoom, 2.0..=18.0).step_by(0.5));
    });

    ui.add_space(12.0);
    ui.separator();
    ui.add_space(8.0);

    ui.label(RichText::new("📊 Status").strong());
    ui.add_space(6.0);

    let state = session.state();
    egui::Grid::new("status_grid")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            ui.label("Places:");
            ui.label(match state.catalog_status {
                StartupStatus::Pending => "loading".to_string(),
                StartupStatus::Done => format!("{}", state.catalog.len()),
                StartupStatus::Failed => "failed".to_string(),
            });
            ui.end_row();

            ui.label("Your position:");
            ui.label(format!(
                "{:.4}, {:.4}{}",
                state.user_position.latitude,
                state.user_position.longitude,
                match state.location_status {
                    StartupStatus::Pending => " (locating)",
                    StartupStatus::Done => "",
                    StartupStatus::Failed => " (default)",
                }
            ));
            ui.end_row();

            ui.label("Model:");
            ui.label(&session.fact_params().model);
            ui.end_row();
        });

    ui.add_space(12.0);
    ui.separator();
    ui.add_space(8.0);

    ui.label(RichText::new("ℹ About").strong());
    ui.add_space(4.0);
    ui.label(RichText::new(eframe_entrypoints::short_version_info("Fun Fact Map")).small());
    ui.label(
        RichText::new("Pick a place on the map and learn something about it")
            .small()
            .weak(),
    );
    ui.add_space(4.0);
    ui.label(RichText::new("Keyboard shortcuts:").small());
    ui.label(RichText::new("  Space - Surprise me").small().weak());
    ui.label(RichText::new("  F - Get fun fact").small().weak());
}
