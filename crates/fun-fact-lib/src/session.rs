//! Session orchestration
//!
//! [`Session`] owns the [`Store`] and runs the three asynchronous operations of
//! the screen (catalog load, location fix, fun-fact request) as Tokio tasks.
//! Tasks never touch the state: they send their result over a channel, and
//! [`Session::poll`] applies results on the caller's thread, one at a time.

use crate::{
    Action, Catalog, CatalogSource, CompletionResponse, CompletionService, Coordinate, FactParams,
    LocationProvider, Result, SessionState, Store, fact_text, random_index,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

/// Callback invoked from worker tasks when a result is ready (e.g. to request a repaint)
pub type UpdateCallback = Arc<dyn Fn() + Send + Sync>;

enum TaskResult {
    Catalog(Result<Catalog>),
    Position(Result<Coordinate>),
    Fact {
        request_id: u64,
        result: Result<CompletionResponse>,
    },
}

/// One run of the application, from launch to close
pub struct Session {
    store: Store,
    runtime: Handle,
    catalog_source: CatalogSource,
    completions: Arc<dyn CompletionService>,
    location: Arc<dyn LocationProvider>,
    fact_params: FactParams,
    rng: StdRng,
    results_tx: UnboundedSender<TaskResult>,
    results_rx: UnboundedReceiver<TaskResult>,
    fact_task: Option<JoinHandle<()>>,
    on_update: Option<UpdateCallback>,
    started: bool,
}

impl Session {
    pub fn new(
        runtime: Handle,
        catalog_source: CatalogSource,
        completions: Arc<dyn CompletionService>,
        location: Arc<dyn LocationProvider>,
        fact_params: FactParams,
    ) -> Self {
        let (results_tx, results_rx) = unbounded_channel();
        Self {
            store: Store::default(),
            runtime,
            catalog_source,
            completions,
            location,
            fact_params,
            rng: StdRng::from_entropy(),
            results_tx,
            results_rx,
            fact_task: None,
            on_update: None,
            started: false,
        }
    }

    /// Use a specific random source for selections
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Call `callback` whenever a background task finishes
    pub fn with_update_callback(mut self, callback: UpdateCallback) -> Self {
        self.on_update = Some(callback);
        self
    }

    pub fn state(&self) -> &SessionState {
        self.store.state()
    }

    pub fn fact_params(&self) -> &FactParams {
        &self.fact_params
    }

    /// Kick off the catalog load and the location fix; later calls do nothing
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        tracing::info!(
            "Starting session (catalog: {:?}, location: {})",
            self.catalog_source,
            self.location.name()
        );

        let source = self.catalog_source.clone();
        self.spawn_reporting(async move { TaskResult::Catalog(source.load().await) });

        let location = self.location.clone();
        self.spawn_reporting(async move {
            let result = match location.request_permission().await {
                Ok(()) => location.current_position().await,
                Err(e) => Err(e),
            };
            TaskResult::Position(result)
        });
    }

    /// Apply every finished task result; returns whether the state changed
    pub fn poll(&mut self) -> bool {
        profiling::scope!("Session::poll");

        let mut changed = false;
        while let Ok(result) = self.results_rx.try_recv() {
            let action = match result {
                TaskResult::Catalog(Ok(catalog)) => {
                    tracing::info!("Loaded {} points of interest", catalog.len());
                    Action::CatalogLoaded(catalog)
                }
                TaskResult::Catalog(Err(e)) => {
                    tracing::warn!("Failed to load catalog: {}", e);
                    Action::CatalogFailed(e.to_string())
                }
                TaskResult::Position(Ok(position)) => {
                    tracing::info!(
                        "User position: ({:.4}, {:.4})",
                        position.latitude,
                        position.longitude
                    );
                    Action::PositionAcquired(position)
                }
                TaskResult::Position(Err(e)) => {
                    tracing::warn!("Failed to get user position: {}", e);
                    Action::PositionFailed(e.to_string())
                }
                TaskResult::Fact {
                    request_id,
                    result: Ok(response),
                } => Action::FactReceived {
                    request_id,
                    text: fact_text(&response),
                },
                TaskResult::Fact {
                    request_id,
                    result: Err(e),
                } => {
                    tracing::warn!("Fun fact request {} failed: {}", request_id, e);
                    Action::FactFailed {
                        request_id,
                        reason: e.to_string(),
                    }
                }
            };
            changed |= self.store.dispatch(action);
        }
        changed
    }

    /// Select a uniformly random catalog entry; no-op on an empty catalog
    pub fn select_random(&mut self) -> bool {
        match random_index(self.state().catalog.len(), &mut self.rng) {
            Some(index) => self.select_index(index),
            None => {
                tracing::debug!("Surprise requested with an empty catalog");
                false
            }
        }
    }

    /// Select the catalog entry with this id; no-op for unknown ids
    pub fn select(&mut self, id: &str) -> bool {
        match self.state().catalog.position_of(id) {
            Some(index) => self.select_index(index),
            None => false,
        }
    }

    fn select_index(&mut self, index: usize) -> bool {
        // Whatever was in flight belongs to the previous selection
        if let Some(task) = self.fact_task.take() {
            task.abort();
        }

        let changed = self.store.dispatch(Action::Select(index));
        if let Some(point) = &self.state().selection {
            tracing::debug!("Selected {:?} ({})", point.title, point.id);
        }
        changed
    }

    /// Request a fun fact for the current selection
    ///
    /// Does nothing (and returns `false`) without a selection, while a request
    /// is outstanding, or once a fact is shown.
    pub fn fetch_fun_fact(&mut self) -> bool {
        if !self.state().can_request_fact() {
            return false;
        }
        let Some(point) = self.state().selection.clone() else {
            return false;
        };

        let request_id = self.store.next_request_id();
        self.store.dispatch(Action::FactRequested { request_id });

        let request = self.fact_params.request_for(&point.title);
        tracing::debug!("Fun fact request {} for {:?}", request_id, point.title);

        let completions = self.completions.clone();
        let task = self.spawn_reporting(async move {
            let result = completions.complete(request).await;
            TaskResult::Fact { request_id, result }
        });
        self.fact_task = Some(task);
        true
    }

    pub fn dismiss_notice(&mut self, index: usize) -> bool {
        self.store.dispatch(Action::DismissNotice(index))
    }

    fn spawn_reporting<F>(&self, future: F) -> JoinHandle<()>
    where
        F: Future<Output = TaskResult> + Send + 'static,
    {
        let results_tx = self.results_tx.clone();
        let on_update = self.on_update.clone();
        self.runtime.spawn(async move {
            let result = future.await;
            // The receiver only goes away with the session
            if results_tx.send(result).is_ok()
                && let Some(on_update) = on_update
            {
                on_update();
            }
        })
    }
}
