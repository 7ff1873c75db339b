//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use crate::web::story_task::StoryTracker;
use momo_core::{
    classifier::{KeywordClassifier, MomentClassifier},
    day_store::DayStore,
    ports::{ProfileVault, SummaryGenerator},
};
use std::sync::Arc;
use tokio::sync::RwLock;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// Service collaborators are injected here rather than reached through globals,
/// so tests can substitute fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<RwLock<DayStore>>,
    pub classifier: Arc<dyn MomentClassifier>,
    pub generator: Arc<dyn SummaryGenerator>,
    pub vault: Arc<dyn ProfileVault>,
    pub stories: StoryTracker,
}

impl AppState {
    /// Builds the state around an existing store, using the keyword classifier.
    pub fn new(
        config: Arc<Config>,
        store: DayStore,
        generator: Arc<dyn SummaryGenerator>,
        vault: Arc<dyn ProfileVault>,
    ) -> Self {
        Self {
            config,
            store: Arc::new(RwLock::new(store)),
            classifier: Arc::new(KeywordClassifier),
            generator,
            vault,
            stories: StoryTracker::default(),
        }
    }
}
