//! # Refresh Orchestrator
//!
//! Coordinates one refresh of the book list:
//! 1. Fan out: fetch books, users and reviews concurrently
//! 2. Fan in: wait for all three; any failure aborts the whole cycle
//! 3. Check references (logged only, the join tolerates them)
//! 4. Build one `BookView` per book on the blocking pool
//! 5. Publish the views and move the lifecycle state along
//!
//! A failed refresh never touches the previously published views. A refresh
//! dropped before it finishes (e.g. by a timeout) ends in `Failed` too, so
//! the next call is not mistaken for an overlap.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use data_loader::Catalog;
use sources::{CatalogSource, FetchError};
use view_model::{BookView, Placeholders, build_book_views};

use crate::state::{Phase, RefreshState};

/// What a call to `refresh` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// New views were published
    Refreshed { books: usize },
    /// Another refresh was already in flight; nothing was fetched
    Skipped,
}

/// Fetch all three collections concurrently and assemble a snapshot.
///
/// The first failing fetch aborts the others and is returned as is.
pub async fn fetch_catalog(source: &dyn CatalogSource) -> Result<Catalog, FetchError> {
    let (books, users, reviews) = tokio::try_join!(
        source.fetch_books(),
        source.fetch_users(),
        source.fetch_reviews()
    )?;

    debug!("Fetched books: {}", books.len());
    debug!("Fetched users: {}", users.len());
    debug!("Fetched reviews: {}", reviews.len());

    Ok(Catalog::new(books, users, reviews))
}

/// Moves the state out of `Loading` if a refresh is dropped mid-flight
struct LoadingGuard {
    state: Arc<RwLock<RefreshState>>,
    armed: bool,
}

impl LoadingGuard {
    fn new(state: Arc<RwLock<RefreshState>>) -> Self {
        Self { state, armed: true }
    }

    /// The refresh settled the state itself
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Ok(mut state) = self.state.try_write() {
            mark_cancelled(&mut state);
            return;
        }
        // Lock is contended; finish the reset on the runtime
        let state = self.state.clone();
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                mark_cancelled(&mut *state.write().await);
            });
        }
    }
}

fn mark_cancelled(state: &mut RefreshState) {
    if state.is_loading() {
        warn!(
            "Refresh cancelled before completion, phase is now {}",
            Phase::Failed
        );
        state.phase = Phase::Failed;
        state.last_error = Some("refresh cancelled".to_string());
    }
}

/// Owns the book list state and refreshes it from a catalog source
#[derive(Clone)]
pub struct RefreshOrchestrator {
    source: Arc<dyn CatalogSource>,
    placeholders: Placeholders,
    state: Arc<RwLock<RefreshState>>,
}

impl RefreshOrchestrator {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            placeholders: Placeholders::default(),
            state: Arc::new(RwLock::new(RefreshState::new())),
        }
    }

    /// Replace the texts used for unresolved references (builder pattern)
    pub fn with_placeholders(mut self, placeholders: Placeholders) -> Self {
        self.placeholders = placeholders;
        self
    }

    /// Main entry point: run one refresh cycle
    ///
    /// # Returns
    /// * `Ok(Refreshed)` - new views are published, phase is `Ready`
    /// * `Ok(Skipped)` - a refresh was already running, nothing changed
    /// * `Err` - a fetch failed; phase is `Failed`, previous views are kept
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        let start_time = Instant::now();

        {
            let mut state = self.state.write().await;
            if state.is_loading() {
                info!("Refresh already in progress, skipping");
                return Ok(RefreshOutcome::Skipped);
            }
            debug!("Refresh starting, previous phase {}", state.phase);
            state.phase = Phase::Loading;
        }
        let guard = LoadingGuard::new(self.state.clone());
        info!("Refreshing catalog from {}", self.source.name());

        match self.load().await {
            Ok(books) => {
                let count = books.len();
                let mut state = self.state.write().await;
                state.phase = Phase::Ready;
                state.books = Arc::new(books);
                state.last_error = None;
                state.last_refreshed = Some(Instant::now());
                drop(state);
                guard.disarm();

                info!(
                    "Published {} book views in {:.2?}",
                    count,
                    start_time.elapsed()
                );
                Ok(RefreshOutcome::Refreshed { books: count })
            }
            Err(err) => {
                warn!("Refresh failed: {:#}", err);
                let mut state = self.state.write().await;
                state.phase = Phase::Failed;
                state.last_error = Some(format!("{:#}", err));
                drop(state);
                guard.disarm();
                Err(err)
            }
        }
    }

    /// Fetch a snapshot and join it into views
    async fn load(&self) -> Result<Vec<BookView>> {
        let catalog = fetch_catalog(self.source.as_ref())
            .await
            .context("Failed to fetch catalog")?;

        let (books, users, reviews) = catalog.counts();
        info!(
            "Fetched {} books, {} users, {} reviews",
            books, users, reviews
        );

        // The join is CPU-bound, keep it off the async workers
        let placeholders = self.placeholders.clone();
        tokio::task::spawn_blocking(move || {
            let report = catalog.dangling_references();
            if !report.is_clean() {
                warn!(
                    "Catalog has {} dangling and {} duplicated references, placeholders will be shown",
                    report.dangling_count(),
                    report.duplicate_count()
                );
            }
            build_book_views(&catalog, placeholders)
        })
        .await
        .context("Book view task panicked")
    }

    pub async fn snapshot(&self) -> RefreshState {
        self.state.read().await.clone()
    }

    /// The currently published views
    pub async fn books(&self) -> Arc<Vec<BookView>> {
        self.state.read().await.books.clone()
    }

    pub async fn phase(&self) -> Phase {
        self.state.read().await.phase
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading()
    }
}
