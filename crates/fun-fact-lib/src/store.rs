//! Session state and its transitions
//!
//! [`SessionState`] is a plain value. Every change goes through
//! [`SessionState::apply`], which returns the next state and leaves the
//! current one untouched. [`Store`] holds the current value plus the
//! monotonic counter used to tag fun-fact requests.

use crate::{Catalog, Coordinate, DEFAULT_USER_POSITION, PointOfInterest};

/// Progress of a one-shot startup operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartupStatus {
    #[default]
    Pending,
    Done,
    Failed,
}

/// Fun fact attached to the current selection
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FunFact {
    /// Nothing requested yet (or the last request failed)
    #[default]
    Unset,
    /// A request is in flight
    Pending { request_id: u64 },
    /// The fact to display
    Ready(String),
}

impl FunFact {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Ready(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

/// Which operation a notice comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Catalog,
    Location,
    Completion,
}

/// A user-visible failure message, shown until dismissed
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    /// Short message for the user
    pub message: String,
    /// Underlying error text
    pub detail: String,
}

impl Notice {
    fn new(kind: NoticeKind, detail: String) -> Self {
        let message = match kind {
            NoticeKind::Catalog => "Failed to load locations",
            NoticeKind::Location => "Failed to get your location",
            NoticeKind::Completion => "Failed to get fun fact",
        };
        Self {
            kind,
            message: message.to_string(),
            detail,
        }
    }

    pub fn title(&self) -> &'static str {
        "Error"
    }
}

/// Everything that can happen to the session
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    CatalogLoaded(Catalog),
    CatalogFailed(String),
    PositionAcquired(Coordinate),
    PositionFailed(String),
    /// Select the catalog entry at this index
    Select(usize),
    FactRequested { request_id: u64 },
    FactReceived { request_id: u64, text: String },
    FactFailed { request_id: u64, reason: String },
    DismissNotice(usize),
}

/// Single source of truth for the screen
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub catalog: Catalog,
    pub catalog_status: StartupStatus,
    pub user_position: Coordinate,
    pub location_status: StartupStatus,
    pub selection: Option<PointOfInterest>,
    pub fun_fact: FunFact,
    pub notices: Vec<Notice>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            catalog: Catalog::default(),
            catalog_status: StartupStatus::Pending,
            user_position: DEFAULT_USER_POSITION,
            location_status: StartupStatus::Pending,
            selection: None,
            fun_fact: FunFact::Unset,
            notices: Vec::new(),
        }
    }
}

impl SessionState {
    /// Whether a fun-fact request may be issued now
    pub fn can_request_fact(&self) -> bool {
        self.selection.is_some() && self.fun_fact == FunFact::Unset
    }

    /// Return the state that follows `action`
    pub fn apply(&self, action: Action) -> SessionState {
        let mut next = self.clone();

        match action {
            Action::CatalogLoaded(catalog) => {
                if self.catalog_status != StartupStatus::Pending {
                    tracing::debug!("Ignoring catalog result, already {:?}", self.catalog_status);
                    return next;
                }
                next.catalog = catalog;
                next.catalog_status = StartupStatus::Done;
            }
            Action::CatalogFailed(detail) => {
                if self.catalog_status != StartupStatus::Pending {
                    return next;
                }
                next.catalog_status = StartupStatus::Failed;
                next.notices.push(Notice::new(NoticeKind::Catalog, detail));
            }
            Action::PositionAcquired(position) => {
                if self.location_status != StartupStatus::Pending {
                    tracing::debug!("Ignoring position fix, already {:?}", self.location_status);
                    return next;
                }
                next.user_position = position;
                next.location_status = StartupStatus::Done;
            }
            Action::PositionFailed(detail) => {
                if self.location_status != StartupStatus::Pending {
                    return next;
                }
                next.location_status = StartupStatus::Failed;
                next.notices.push(Notice::new(NoticeKind::Location, detail));
            }
            Action::Select(index) => {
                if let Some(point) = self.catalog.get(index) {
                    next.selection = Some(point.clone());
                    next.fun_fact = FunFact::Unset;
                }
            }
            Action::FactRequested { request_id } => {
                if self.can_request_fact() {
                    next.fun_fact = FunFact::Pending { request_id };
                }
            }
            Action::FactReceived { request_id, text } => {
                if self.fun_fact == (FunFact::Pending { request_id }) {
                    next.fun_fact = FunFact::Ready(text);
                } else {
                    tracing::debug!("Discarding stale fun fact for request {}", request_id);
                }
            }
            Action::FactFailed { request_id, reason } => {
                if self.fun_fact == (FunFact::Pending { request_id }) {
                    next.fun_fact = FunFact::Unset;
                    next.notices.push(Notice::new(NoticeKind::Completion, reason));
                } else {
                    tracing::debug!("Discarding stale failure for request {}", request_id);
                }
            }
            Action::DismissNotice(index) => {
                if index < next.notices.len() {
                    next.notices.remove(index);
                }
            }
        }

        next
    }
}

/// Holds the current [`SessionState`] and hands out request ids
#[derive(Debug, Default)]
pub struct Store {
    state: SessionState,
    last_request_id: u64,
}

impl Store {
    pub fn new(state: SessionState) -> Self {
        Self {
            state,
            last_request_id: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Apply an action; returns whether the state changed
    pub fn dispatch(&mut self, action: Action) -> bool {
        profiling::scope!("Store::dispatch");

        let next = self.state.apply(action);
        let changed = next != self.state;
        self.state = next;
        changed
    }

    /// Next id in the monotonic request sequence (starts at 1)
    pub fn next_request_id(&mut self) -> u64 {
        self.last_request_id += 1;
        self.last_request_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json_str(
            r#"{"locations": [
                {"id": "1", "title": "Vasa Museum", "latitude": 59.328, "longitude": 18.091, "category": "museum"},
                {"id": "2", "title": "Skansen", "latitude": 59.3262, "longitude": 18.1036, "category": "museum"}
            ]}"#,
        )
        .unwrap()
    }

    fn loaded_state() -> SessionState {
        SessionState::default().apply(Action::CatalogLoaded(catalog()))
    }

    #[test]
    fn test_initial_state() {
        let state = SessionState::default();
        assert!(state.selection.is_none());
        assert_eq!(state.fun_fact, FunFact::Unset);
        assert_eq!(state.user_position, DEFAULT_USER_POSITION);
        assert!(!state.can_request_fact());
    }

    #[test]
    fn test_apply_leaves_original_untouched() {
        let state = loaded_state();
        let next = state.apply(Action::Select(0));
        assert!(state.selection.is_none());
        assert_eq!(next.selection.as_ref().unwrap().title, "Vasa Museum");
    }

    #[test]
    fn test_select_out_of_range_is_noop() {
        let state = SessionState::default();
        assert_eq!(state.apply(Action::Select(0)), state);
    }

    #[test]
    fn test_full_fact_cycle() {
        let state = loaded_state().apply(Action::Select(0));
        assert!(state.can_request_fact());

        let state = state.apply(Action::FactRequested { request_id: 1 });
        assert!(state.fun_fact.is_pending());
        assert!(!state.can_request_fact());

        let state = state.apply(Action::FactReceived {
            request_id: 1,
            text: "It sank in 1628.".to_string(),
        });
        assert_eq!(state.fun_fact.text(), Some("It sank in 1628."));
        assert!(!state.can_request_fact());
    }

    #[test]
    fn test_selection_change_clears_fact() {
        let state = loaded_state()
            .apply(Action::Select(0))
            .apply(Action::FactRequested { request_id: 1 })
            .apply(Action::FactReceived {
                request_id: 1,
                text: "Vasa fact".to_string(),
            })
            .apply(Action::Select(1));

        assert_eq!(state.selection.as_ref().unwrap().title, "Skansen");
        assert_eq!(state.fun_fact, FunFact::Unset);
    }

    #[test]
    fn test_reselecting_same_point_clears_fact() {
        let state = loaded_state()
            .apply(Action::Select(0))
            .apply(Action::FactRequested { request_id: 1 })
            .apply(Action::FactReceived {
                request_id: 1,
                text: "Vasa fact".to_string(),
            })
            .apply(Action::Select(0));
        assert_eq!(state.fun_fact, FunFact::Unset);
    }

    #[test]
    fn test_stale_fact_is_discarded() {
        // Request for A, then select B and request again
        let state = loaded_state()
            .apply(Action::Select(0))
            .apply(Action::FactRequested { request_id: 1 })
            .apply(Action::Select(1))
            .apply(Action::FactRequested { request_id: 2 });

        let after_stale = state.apply(Action::FactReceived {
            request_id: 1,
            text: "Vasa fact".to_string(),
        });
        assert_eq!(after_stale.fun_fact, FunFact::Pending { request_id: 2 });

        let after_current = after_stale.apply(Action::FactReceived {
            request_id: 2,
            text: "Skansen fact".to_string(),
        });
        assert_eq!(after_current.fun_fact.text(), Some("Skansen fact"));
    }

    #[test]
    fn test_stale_fact_after_selection_change_without_new_request() {
        let state = loaded_state()
            .apply(Action::Select(0))
            .apply(Action::FactRequested { request_id: 1 })
            .apply(Action::Select(1))
            .apply(Action::FactReceived {
                request_id: 1,
                text: "Vasa fact".to_string(),
            });
        assert_eq!(state.fun_fact, FunFact::Unset);
        assert!(state.notices.is_empty());
    }

    #[test]
    fn test_fact_request_without_selection_is_noop() {
        let state = loaded_state();
        assert_eq!(state.apply(Action::FactRequested { request_id: 1 }), state);
    }

    #[test]
    fn test_duplicate_fact_request_is_noop() {
        let state = loaded_state()
            .apply(Action::Select(0))
            .apply(Action::FactRequested { request_id: 1 });
        let again = state.apply(Action::FactRequested { request_id: 2 });
        assert_eq!(again.fun_fact, FunFact::Pending { request_id: 1 });
    }

    #[test]
    fn test_fact_failure_allows_retry() {
        let state = loaded_state()
            .apply(Action::Select(0))
            .apply(Action::FactRequested { request_id: 1 })
            .apply(Action::FactFailed {
                request_id: 1,
                reason: "HTTP error: timeout".to_string(),
            });

        assert_eq!(state.fun_fact, FunFact::Unset);
        assert!(state.can_request_fact());
        assert_eq!(state.notices.len(), 1);
        assert_eq!(state.notices[0].kind, NoticeKind::Completion);
        assert_eq!(state.notices[0].message, "Failed to get fun fact");
        assert_eq!(state.notices[0].title(), "Error");
    }

    #[test]
    fn test_catalog_failure_keeps_catalog_empty() {
        let state = SessionState::default().apply(Action::CatalogFailed("bad json".to_string()));
        assert!(state.catalog.is_empty());
        assert_eq!(state.catalog_status, StartupStatus::Failed);
        assert_eq!(state.notices[0].message, "Failed to load locations");
        assert_eq!(state.notices[0].detail, "bad json");
    }

    #[test]
    fn test_catalog_loads_only_once() {
        let state = loaded_state();
        let empty = Catalog::from_json_str(r#"{"locations": []}"#).unwrap();
        let again = state.apply(Action::CatalogLoaded(empty));
        assert_eq!(again.catalog.len(), 2);
    }

    #[test]
    fn test_location_failure_keeps_default() {
        let state = SessionState::default().apply(Action::PositionFailed("denied".to_string()));
        assert_eq!(state.user_position, DEFAULT_USER_POSITION);
        assert_eq!(state.location_status, StartupStatus::Failed);
        assert_eq!(state.notices[0].kind, NoticeKind::Location);
    }

    #[test]
    fn test_position_overwritten_at_most_once() {
        let oslo = Coordinate::new(10.7522, 59.9139);
        let state = SessionState::default()
            .apply(Action::PositionAcquired(oslo))
            .apply(Action::PositionAcquired(Coordinate::new(0.0, 0.0)));
        assert_eq!(state.user_position, oslo);
    }

    #[test]
    fn test_dismiss_notice() {
        let state = SessionState::default()
            .apply(Action::CatalogFailed("a".to_string()))
            .apply(Action::PositionFailed("b".to_string()));
        assert_eq!(state.notices.len(), 2);

        let state = state.apply(Action::DismissNotice(0));
        assert_eq!(state.notices.len(), 1);
        assert_eq!(state.notices[0].kind, NoticeKind::Location);

        let state = state.apply(Action::DismissNotice(5));
        assert_eq!(state.notices.len(), 1);
    }

    #[test]
    fn test_store_dispatch_and_request_ids() {
        let mut store = Store::default();
        assert!(store.dispatch(Action::CatalogLoaded(catalog())));
        assert!(!store.dispatch(Action::Select(9)));
        assert!(store.dispatch(Action::Select(1)));
        assert_eq!(store.state().selection.as_ref().unwrap().id, "2");

        assert_eq!(store.next_request_id(), 1);
        assert_eq!(store.next_request_id(), 2);
    }
}
