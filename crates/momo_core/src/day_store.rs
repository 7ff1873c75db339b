//! crates/momo_core/src/day_store.rs
//!
//! In-memory mapping from calendar date to that day's moments and summary.
//! Entries are created lazily and never removed.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::{DailySummary, DayData, Moment, MoodBand};

/// Calendar cell for one stored date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOverview {
    pub date: NaiveDate,
    pub moment_count: usize,
    pub mood: Option<u8>,
    pub band: Option<MoodBand>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DayStore {
    days: BTreeMap<NaiveDate, DayData>,
}

impl DayStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a moment to `date`, creating the day if needed. The summary is untouched.
    pub fn add_moment(&mut self, date: NaiveDate, moment: Moment) {
        self.days.entry(date).or_default().moments.push(moment);
    }

    /// Replaces the summary for `date`. Moments are untouched.
    pub fn set_summary(&mut self, date: NaiveDate, summary: DailySummary) {
        self.days.entry(date).or_default().summary = Some(summary);
    }

    /// Returns the day's data, or an empty day for an unknown date.
    pub fn get(&self, date: NaiveDate) -> DayData {
        self.days.get(&date).cloned().unwrap_or_default()
    }

    /// Moments for `date` in insertion order.
    pub fn moments(&self, date: NaiveDate) -> &[Moment] {
        self.days
            .get(&date)
            .map(|d| d.moments.as_slice())
            .unwrap_or(&[])
    }

    /// Flips the `completed` flag of one action in the day's summary.
    ///
    /// Returns the new value, or `None` if the date has no summary or no
    /// action with that id.
    pub fn toggle_action(&mut self, date: NaiveDate, action_id: &str) -> Option<bool> {
        let action = self
            .days
            .get_mut(&date)?
            .summary
            .as_mut()?
            .actions
            .iter_mut()
            .find(|a| a.id == action_id)?;
        action.completed = !action.completed;
        Some(action.completed)
    }

    /// Overview of every stored date in the given month, in date order.
    pub fn month(&self, year: i32, month: u32) -> Vec<DayOverview> {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return Vec::new();
        };

        self.days
            .range(first..)
            .take_while(|(date, _)| date.year() == year && date.month() == month)
            .map(|(date, day)| {
                let mood = day.summary.as_ref().map(|s| s.mood);
                DayOverview {
                    date: *date,
                    moment_count: day.moments.len(),
                    mood,
                    band: mood.map(MoodBand::from_mood),
                    title: day.summary.as_ref().map(|s| s.title.clone()),
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
