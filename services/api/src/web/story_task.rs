//! services/api/src/web/story_task.rs
//!
//! This module contains the asynchronous "worker" function that turns a day's
//! moments into its daily story.
//!
//! The processing animation and the generator run side by side; the summary is
//! written back only after both have finished, and always to the date captured
//! when the task started.

use crate::web::state::AppState;
use chrono::NaiveDate;
use momo_core::{domain::DailySummary, ports::{PortError, PortResult}};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{info, warn};
use utoipa::ToSchema;

/// Labels shown while a story is being written, one per tick.
pub const STEP_LABELS: [&str; 5] = [
    "Encrypting & Vaulting your moments...",
    "Analyzing context (weather)...",
    "Recalling similar days...",
    "Momo is writing your story...",
    "Updating your Life Dashboard...",
];

/// Snapshot of a running story task.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StoryProgress {
    /// Zero-based index of the active step.
    pub step: usize,
    pub total: usize,
    pub label: String,
}

//=========================================================================================
// In-flight Table
//=========================================================================================

/// Tracks which dates currently have a story being generated, and how far the
/// animation has got. At most one task per date.
#[derive(Clone, Default)]
pub struct StoryTracker {
    running: Arc<Mutex<HashMap<NaiveDate, usize>>>,
}

impl StoryTracker {
    fn table(&self) -> MutexGuard<'_, HashMap<NaiveDate, usize>> {
        self.running.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Claims `date`. Returns `None` when a task for it is already running.
    pub fn begin(&self, date: NaiveDate) -> Option<StoryTicket> {
        let mut table = self.table();
        if table.contains_key(&date) {
            return None;
        }
        table.insert(date, 0);
        Some(StoryTicket {
            tracker: self.clone(),
            date,
        })
    }

    pub fn progress(&self, date: NaiveDate) -> Option<StoryProgress> {
        self.table().get(&date).map(|&step| StoryProgress {
            step,
            total: STEP_LABELS.len(),
            label: STEP_LABELS[step.min(STEP_LABELS.len() - 1)].to_string(),
        })
    }

    pub fn is_running(&self, date: NaiveDate) -> bool {
        self.table().contains_key(&date)
    }
}

/// Ownership of one date's in-flight slot. Dropping it frees the date.
pub struct StoryTicket {
    tracker: StoryTracker,
    date: NaiveDate,
}

impl StoryTicket {
    fn set_step(&self, step: usize) {
        if let Some(current) = self.tracker.table().get_mut(&self.date) {
            *current = step;
        }
    }
}

impl Drop for StoryTicket {
    fn drop(&mut self) {
        self.tracker.table().remove(&self.date);
    }
}

//=========================================================================================
// The Story Task
//=========================================================================================

/// Steps through every label, one per `interval`.
async fn run_steps(ticket: &StoryTicket, interval: Duration) {
    for step in 0..STEP_LABELS.len() {
        ticket.set_step(step);
        tokio::time::sleep(interval).await;
    }
}

/// Generates and stores the story for `date`.
///
/// Fails with `PortError::InFlight` if a story for the same date is already
/// running. On any generator failure nothing is written.
pub async fn story_process(
    app_state: Arc<AppState>,
    date: NaiveDate,
) -> PortResult<DailySummary> {
    let ticket = app_state
        .stories
        .begin(date)
        .ok_or(PortError::InFlight(date))?;

    let moments = app_state.store.read().await.moments(date).to_vec();
    info!(%date, moments = moments.len(), "Story process started.");

    let (_, result) = futures::future::join(
        run_steps(&ticket, app_state.config.processing_step),
        app_state.generator.generate_summary(&moments),
    )
    .await;

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            warn!(%date, error = %e, "Story generation failed.");
            return Err(e);
        }
    };

    app_state.store.write().await.set_summary(date, summary.clone());
    info!(%date, title = %summary.title, mood = summary.mood, "Story stored.");
    Ok(summary)
}
