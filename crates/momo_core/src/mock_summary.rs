//! crates/momo_core/src/mock_summary.rs
//!
//! A placeholder summary backend that needs no external service. It does not
//! analyse the moments; it only links one highlight to each of them.

use async_trait::async_trait;

use crate::domain::{DailySummary, Highlight, Moment, RetroAction};
use crate::ports::{PortResult, SummaryGenerator};

/// Mood reported by the mock backend regardless of content.
pub const MOCK_MOOD: u8 = 7;

const HIGHLIGHT_PREVIEW_CHARS: usize = 15;

/// Builds the templated summary for a day's moments. Never fails.
pub fn generate_mock(moments: &[Moment]) -> DailySummary {
    DailySummary {
        title: "Finding The Flow".to_string(),
        story: "Today was a mix of focused productivity and necessary reflection. \
                Momo noticed you started with high energy but felt the midday slump. \
                Capturing these small wins, like the coffee break, anchors your day \
                in positivity despite the workload."
            .to_string(),
        mood: MOCK_MOOD,
        weather_context: "Partly Cloudy, 22°C".to_string(),
        highlights: moments
            .iter()
            .map(|m| Highlight {
                text: format!(
                    "Reflected on: {}...",
                    m.text.chars().take(HIGHLIGHT_PREVIEW_CHARS).collect::<String>()
                ),
                source_moment_id: Some(m.id.clone()),
            })
            .collect(),
        actions: vec![
            RetroAction {
                id: "1".to_string(),
                text: "Take a 10 min walk before 9am tomorrow (Sunny forecast)".to_string(),
                completed: false,
            },
            RetroAction {
                id: "2".to_string(),
                text: "Write down 3 priorities for tomorrow tonight".to_string(),
                completed: false,
            },
        ],
        tags: vec!["Productivity".to_string(), "Mindfulness".to_string()],
    }
}

/// `SummaryGenerator` backed by [`generate_mock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MockSummaryGenerator;

#[async_trait]
impl SummaryGenerator for MockSummaryGenerator {
    async fn generate_summary(&self, moments: &[Moment]) -> PortResult<DailySummary> {
        Ok(generate_mock(moments))
    }
}
