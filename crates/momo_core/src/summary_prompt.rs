//! crates/momo_core/src/summary_prompt.rs
//!
//! The provider-independent half of remote summary generation: building the
//! prompt from a day's moments and turning the model's reply back into a
//! validated `DailySummary`.

use serde_json::{Map, Value};

use crate::domain::{DailySummary, Highlight, Moment, RetroAction, MOOD_MAX, MOOD_MIN};
use crate::ports::{PortError, PortResult};

pub const FALLBACK_TITLE: &str = "A Day in Reflection";
pub const FALLBACK_STORY: &str = "Your day unfolded with various moments worth remembering.";
pub const FALLBACK_WEATHER: &str = "Unknown";
/// Used when the reply carries no usable mood.
pub const FALLBACK_MOOD: u8 = 5;

const PROMPT_HEADER: &str = "You are Momo, a warm and perceptive companion who helps people \
reflect on their day. Below are the moments someone logged today, in the order they happened.";

const PROMPT_INSTRUCTIONS: &str = r#"Write a daily summary as a single JSON object with exactly these fields:
{
  "title": "a short, evocative title for the day (at most 5 words)",
  "story": "2-3 sentences reflecting on the day, written in the second person; notice patterns and be kind",
  "mood": <integer from 1 (very low) to 10 (very high) describing the overall emotional tone>,
  "weatherContext": "a brief weather description inferred from the moments, e.g. 'Partly Cloudy, 22°C'",
  "highlights": [
    { "text": "a meaningful highlight", "sourceMomentId": "<the ID of the moment it came from>" }
  ],
  "actions": [
    { "id": "action-1", "text": "a specific, helpful recommendation", "completed": false }
  ],
  "tags": ["Theme1", "Theme2"]
}

Rules:
- Pick the 2-4 most meaningful highlights and cite the moment ID each one came from.
- Suggest 2-3 concrete actions.
- Tags name the main themes, such as "Productivity", "Health", "Social" or "Stress".
- Reply with the JSON object only. No markdown, no code fences, no commentary."#;

/// Renders one moment as a single numbered prompt line. `index` is zero-based.
pub fn describe_moment(index: usize, moment: &Moment) -> String {
    let mut line = format!(
        "{}. [{}] {} (ID: {})",
        index + 1,
        moment.timestamp,
        moment.text,
        moment.id
    );
    if let Some(emotion) = moment.emotion {
        line.push_str(&format!(" (Emotion: {})", emotion));
    }
    if let Some(location) = &moment.location {
        line.push_str(&format!(" (Location: {})", location));
    }
    if let Some(weather) = &moment.weather {
        line.push_str(&format!(" (Weather: {})", weather));
    }
    if !moment.tags.is_empty() {
        line.push_str(&format!(" (Tags: {})", moment.tags.join(", ")));
    }
    if let Some(activity) = &moment.strava_activity {
        line.push_str(&format!(
            " (Activity: {}, {}, {})",
            activity.kind, activity.distance, activity.duration
        ));
    }
    // Keep the one-line-per-moment shape even if the text spans lines.
    line.replace(['\n', '\r'], " ")
}

/// Builds the full instruction prompt for a day's moments.
pub fn build_prompt(moments: &[Moment]) -> String {
    let lines = moments
        .iter()
        .enumerate()
        .map(|(i, m)| describe_moment(i, m))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{PROMPT_HEADER}\n\nMoments:\n{lines}\n\n{PROMPT_INSTRUCTIONS}")
}

/// Removes a surrounding ``` or ```json fence, if the reply has one.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Parses the model's reply text and normalizes it into a `DailySummary`.
///
/// Absent fields are defaulted, `mood` is clamped into range, and highlight
/// sources that do not name one of `moments` are dropped so every remaining
/// `sourceMomentId` resolves within the day.
pub fn parse_summary_reply(text: &str, moments: &[Moment]) -> PortResult<DailySummary> {
    let body = strip_code_fence(text);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| PortError::MalformedResponse(format!("summary is not valid JSON: {e}")))?;
    let Value::Object(fields) = value else {
        return Err(PortError::MalformedResponse(
            "summary JSON is not an object".to_string(),
        ));
    };

    Ok(DailySummary {
        title: non_blank(&fields, "title").unwrap_or_else(|| FALLBACK_TITLE.to_string()),
        story: non_blank(&fields, "story").unwrap_or_else(|| FALLBACK_STORY.to_string()),
        mood: normalize_mood(fields.get("mood")),
        weather_context: non_blank(&fields, "weatherContext")
            .unwrap_or_else(|| FALLBACK_WEATHER.to_string()),
        highlights: highlights(fields.get("highlights"), moments),
        actions: actions(fields.get("actions")),
        tags: string_list(fields.get("tags")),
    })
}

/// Rounds and clamps a numeric mood into `MOOD_MIN..=MOOD_MAX`.
pub fn normalize_mood(raw: Option<&Value>) -> u8 {
    let number = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() => n.round().clamp(MOOD_MIN as f64, MOOD_MAX as f64) as u8,
        _ => FALLBACK_MOOD,
    }
}

fn non_blank(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_list(raw: Option<&Value>) -> Vec<String> {
    raw.and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn highlights(raw: Option<&Value>, moments: &[Moment]) -> Vec<Highlight> {
    let Some(items) = raw.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(Highlight {
                text: text.clone(),
                source_moment_id: None,
            }),
            Value::Object(obj) => {
                let text = obj.get("text").and_then(Value::as_str)?.to_string();
                let source_moment_id = obj
                    .get("sourceMomentId")
                    .and_then(id_string)
                    .filter(|id| moments.iter().any(|m| &m.id == id));
                Some(Highlight {
                    text,
                    source_moment_id,
                })
            }
            _ => None,
        })
        .collect()
}

fn actions(raw: Option<&Value>) -> Vec<RetroAction> {
    let Some(items) = raw.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(text) => Some((None, text.clone())),
            Value::Object(obj) => {
                let text = obj.get("text").and_then(Value::as_str)?.to_string();
                Some((obj.get("id").and_then(id_string), text))
            }
            _ => None,
        })
        .enumerate()
        // A freshly generated action is never already done.
        .map(|(i, (id, text))| RetroAction {
            id: id.unwrap_or_else(|| format!("action-{}", i + 1)),
            text,
            completed: false,
        })
        .collect()
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Emotion, StravaActivity};

    fn moment(id: &str, text: &str) -> Moment {
        Moment {
            id: id.into(),
            text: text.into(),
            timestamp: "08:30".into(),
            emotion: None,
            tags: vec![],
            location: None,
            weather: None,
            strava_activity: None,
        }
    }

    #[test]
    fn describe_includes_present_attributes_only() {
        let bare = describe_moment(0, &moment("m1", "Woke up"));
        assert_eq!(bare, "1. [08:30] Woke up (ID: m1)");

        let full = Moment {
            emotion: Some(Emotion::Calm),
            tags: vec!["Nature".into(), "Health".into()],
            location: Some("Pier".into()),
            weather: Some("18°C Sunset".into()),
            strava_activity: Some(StravaActivity {
                kind: "Run".into(),
                distance: "5 km".into(),
                duration: "30 min".into(),
                calories: 300,
            }),
            ..moment("m2", "Long walk")
        };
        assert_eq!(
            describe_moment(1, &full),
            "2. [08:30] Long walk (ID: m2) (Emotion: calm) (Location: Pier) \
             (Weather: 18°C Sunset) (Tags: Nature, Health) (Activity: Run, 5 km, 30 min)"
        );
    }

    #[test]
    fn prompt_lists_moments_in_order() {
        let prompt = build_prompt(&[moment("a", "first"), moment("b", "second\nline")]);
        let first = prompt.find("1. [08:30] first").unwrap();
        let second = prompt.find("2. [08:30] second line").unwrap();
        assert!(first < second);
        for field in ["title", "story", "mood", "weatherContext", "highlights", "actions", "tags"] {
            assert!(prompt.contains(&format!("\"{field}\"")), "missing {field}");
        }
    }

    #[test]
    fn strips_fences() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn fenced_reply_parses() {
        let reply = "```json\n{\"title\":\"Quiet Wins\",\"mood\":8}\n```";
        let summary = parse_summary_reply(reply, &[]).unwrap();
        assert_eq!(summary.title, "Quiet Wins");
        assert_eq!(summary.mood, 8);
    }

    #[test]
    fn mood_is_clamped() {
        assert_eq!(parse_summary_reply(r#"{"mood":15}"#, &[]).unwrap().mood, 10);
        assert_eq!(parse_summary_reply(r#"{"mood":-3}"#, &[]).unwrap().mood, 1);
        assert_eq!(parse_summary_reply(r#"{"mood":6.6}"#, &[]).unwrap().mood, 7);
        assert_eq!(parse_summary_reply(r#"{"mood":"4"}"#, &[]).unwrap().mood, 4);
        assert_eq!(parse_summary_reply(r#"{"mood":"high"}"#, &[]).unwrap().mood, 5);
    }

    #[test]
    fn missing_fields_are_defaulted() {
        let summary = parse_summary_reply("{}", &[]).unwrap();
        assert_eq!(summary.title, FALLBACK_TITLE);
        assert_eq!(summary.story, FALLBACK_STORY);
        assert_eq!(summary.weather_context, "Unknown");
        assert_eq!(summary.mood, FALLBACK_MOOD);
        assert!(summary.highlights.is_empty());
        assert!(summary.actions.is_empty());
        assert!(summary.tags.is_empty());
    }

    #[test]
    fn unknown_highlight_sources_are_dropped() {
        let moments = [moment("m1", "coffee")];
        let reply = r#"{"highlights":[
            {"text":"Coffee","sourceMomentId":"m1"},
            {"text":"Invented","sourceMomentId":"m99"},
            {"text":"Loose"}
        ]}"#;
        let summary = parse_summary_reply(reply, &moments).unwrap();
        let ids: Vec<_> = summary
            .highlights
            .iter()
            .map(|h| h.source_moment_id.as_deref())
            .collect();
        assert_eq!(ids, [Some("m1"), None, None]);
    }

    #[test]
    fn actions_get_ids_and_start_open() {
        let reply = r#"{"actions":[
            {"id":"a","text":"Stretch","completed":true},
            {"text":"Sleep early"},
            {"id":7,"text":"Call mum"}
        ]}"#;
        let summary = parse_summary_reply(reply, &[]).unwrap();
        let ids: Vec<_> = summary.actions.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["a", "action-2", "7"]);
        assert!(summary.actions.iter().all(|a| !a.completed));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse_summary_reply("Sure! Here is your summary.", &[]).unwrap_err();
        assert!(matches!(err, PortError::MalformedResponse(_)));
        let err = parse_summary_reply("[1,2]", &[]).unwrap_err();
        assert!(matches!(err, PortError::MalformedResponse(_)));
    }
}
