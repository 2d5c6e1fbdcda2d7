//! UI-only state
//!
//! Session data (catalog, selection, fun fact) lives in the library's store;
//! this is just what the screen itself needs to remember between frames.

/// Sidebar tabs
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SidebarTab {
    Places,
    Settings,
}

/// Available map tile providers
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TilesProvider {
    Mapbox,
    OpenStreetMap,
    OpenTopoMap,
}

impl TilesProvider {
    pub fn attribution(&self) -> &'static str {
        match self {
            Self::Mapbox => "© Mapbox © OpenStreetMap contributors",
            Self::OpenStreetMap => "© OpenStreetMap contributors",
            Self::OpenTopoMap => "© OpenTopoMap (CC-BY-SA)",
        }
    }

    /// Providers usable in this build (Mapbox needs a token)
    pub fn available(has_map_token: bool) -> Vec<Self> {
        let mut providers = Vec::with_capacity(3);
        if has_map_token {
            providers.push(Self::Mapbox);
        }
        providers.push(Self::OpenStreetMap);
        providers.push(Self::OpenTopoMap);
        providers
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mapbox => "Mapbox Streets",
            Self::OpenStreetMap => "OpenStreetMap",
            Self::OpenTopoMap => "OpenTopoMap",
        }
    }
}

/// Runtime-adjustable UI settings
pub struct UiState {
    /// Whether sidebar is open
    pub sidebar_open: bool,

    /// Current active tab in sidebar
    pub active_tab: SidebarTab,

    /// Map tiles provider
    pub tiles_provider: TilesProvider,

    /// A Mapbox token was configured
    pub mapbox_available: bool,

    /// Zoom level the camera uses for its targets
    pub zoom: f64,

    /// Only list places of this category
    pub category_filter: Option<String>,
}

impl UiState {
    pub fn new(has_map_token: bool, zoom: f64) -> Self {
        Self {
            sidebar_open: false,
            active_tab: SidebarTab::Places,
            tiles_provider: if has_map_token {
                TilesProvider::Mapbox
            } else {
                TilesProvider::OpenStreetMap
            },
            mapbox_available: has_map_token,
            zoom,
            category_filter: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapbox_only_with_token() {
        assert_eq!(
            TilesProvider::available(false),
            vec![TilesProvider::OpenStreetMap, TilesProvider::OpenTopoMap]
        );
        assert_eq!(TilesProvider::available(true)[0], TilesProvider::Mapbox);
    }

    #[test]
    fn test_default_provider_follows_token() {
        assert_eq!(
            UiState::new(true, 12.0).tiles_provider,
            TilesProvider::Mapbox
        );
        assert_eq!(
            UiState::new(false, 12.0).tiles_provider,
            TilesProvider::OpenStreetMap
        );
    }
}
