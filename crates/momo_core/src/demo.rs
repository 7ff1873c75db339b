//! crates/momo_core/src/demo.rs
//!
//! Sample history so the calendar and dashboard have something to show
//! before the user has logged anything.

use chrono::{Days, NaiveDate};

use crate::day_store::DayStore;
use crate::domain::{DailySummary, Emotion, Highlight, Moment, RetroAction};

fn moment(id: &str, text: &str, timestamp: &str, emotion: Emotion, tags: &[&str]) -> Moment {
    Moment {
        id: id.to_string(),
        text: text.to_string(),
        timestamp: timestamp.to_string(),
        emotion: Some(emotion),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        location: None,
        weather: None,
        strava_activity: None,
    }
}

fn brief_summary(title: &str, mood: u8, weather: &str) -> DailySummary {
    DailySummary {
        title: title.to_string(),
        story: "...".to_string(),
        mood,
        weather_context: weather.to_string(),
        highlights: Vec::new(),
        actions: Vec::new(),
        tags: Vec::new(),
    }
}

/// Writes four past days relative to `today`. Dates that cannot be computed
/// (before the start of the calendar) are skipped.
pub fn seed(store: &mut DayStore, today: NaiveDate) {
    let ago = |days: u64| today.checked_sub_days(Days::new(days));

    if let Some(date) = ago(1) {
        store.add_moment(
            date,
            Moment {
                location: Some("San Francisco Pier".to_string()),
                weather: Some("18°C Sunset".to_string()),
                ..moment(
                    "1",
                    "Long walk by the pier, felt calm.",
                    "18:30",
                    Emotion::Calm,
                    &["Nature", "Health"],
                )
            },
        );
        store.set_summary(
            date,
            DailySummary {
                title: "A Breath of Fresh Air".to_string(),
                story: "After a chaotic week, you finally found some stillness. The walk by \
                        the pier wasn't just exercise; it was a necessary reset. The sunset \
                        seemed to anchor you."
                    .to_string(),
                mood: 8,
                weather_context: "Clear skies, 18°C".to_string(),
                highlights: vec![
                    Highlight {
                        text: "Sunset walk".to_string(),
                        source_moment_id: Some("1".to_string()),
                    },
                    Highlight {
                        text: "Disconnected from work".to_string(),
                        source_moment_id: Some("1".to_string()),
                    },
                ],
                actions: vec![RetroAction {
                    id: "a1".to_string(),
                    text: "Keep the phone off for 1 hour tonight".to_string(),
                    completed: true,
                }],
                tags: vec!["Health".to_string(), "Nature".to_string()],
            },
        );
    }

    if let Some(date) = ago(2) {
        store.add_moment(
            date,
            Moment {
                location: Some("Home Office".to_string()),
                weather: Some("Rainy 14°C".to_string()),
                ..moment(
                    "2",
                    "Deadline looming. Stressed.",
                    "09:15",
                    Emotion::Stressed,
                    &["Work", "Deadline"],
                )
            },
        );
        store.set_summary(
            date,
            DailySummary {
                title: "The Pressure Cooker".to_string(),
                story: "High anxiety defined the morning. The deadline is a real hurdle, but \
                        naming the stress is the first step in managing it."
                    .to_string(),
                mood: 3,
                weather_context: "Overcast, 14°C".to_string(),
                highlights: vec![Highlight {
                    text: "Acknowledged stress".to_string(),
                    source_moment_id: Some("2".to_string()),
                }],
                actions: vec![RetroAction {
                    id: "a2".to_string(),
                    text: "Break project into 15min chunks".to_string(),
                    completed: false,
                }],
                tags: vec!["Work".to_string(), "Anxiety".to_string()],
            },
        );
    }

    if let Some(date) = ago(5) {
        store.add_moment(
            date,
            moment("3", "Great lunch with team.", "13:00", Emotion::Happy, &["Social"]),
        );
        store.set_summary(date, brief_summary("Social Connection", 9, "Sunny"));
    }

    if let Some(date) = ago(12) {
        store.add_moment(date, moment("4", "Tired.", "08:00", Emotion::Tired, &["Sleep"]));
        store.set_summary(date, brief_summary("Rest Required", 4, "Rainy"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_past_days_only() {
        let today: NaiveDate = "2024-06-15".parse().unwrap();
        let mut store = DayStore::new();
        seed(&mut store, today);

        assert_eq!(store.len(), 4);
        assert!(store.get(today).moments.is_empty());
        let yesterday = store.get("2024-06-14".parse().unwrap());
        assert_eq!(yesterday.summary.map(|s| s.mood), Some(8));
        assert_eq!(store.get("2024-06-03".parse().unwrap()).moments[0].text, "Tired.");
    }

    #[test]
    fn seeded_highlights_resolve() {
        let today: NaiveDate = "2024-06-15".parse().unwrap();
        let mut store = DayStore::new();
        seed(&mut store, today);

        for overview in store.month(2024, 6) {
            let day = store.get(overview.date);
            let summary = day.summary.expect("every seeded day has a summary");
            for h in summary.highlights {
                let id = h.source_moment_id.expect("seeded highlights are sourced");
                assert!(day.moments.iter().any(|m| m.id == id));
            }
        }
    }
}
