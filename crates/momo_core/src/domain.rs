//! crates/momo_core/src/domain.rs
//!
//! Defines the pure, core data structures for the journaling application.
//! The JSON field names match the shapes the presentation layer and the
//! text-generation service exchange (`camelCase`).

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::MomentClassifier;
use crate::ports::{PortError, PortResult};

//=========================================================================================
// Moments
//=========================================================================================

/// The coarse emotion attached to a moment by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Calm,
    Stressed,
    Tired,
    Excited,
    Neutral,
}

impl Emotion {
    /// Lowercase wire name, as used in prompts and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Calm => "calm",
            Emotion::Stressed => "stressed",
            Emotion::Tired => "tired",
            Emotion::Excited => "excited",
            Emotion::Neutral => "neutral",
        }
    }

    /// Capitalized display label. A moment without an emotion shows as "Neutral".
    pub fn label(emotion: Option<Emotion>) -> &'static str {
        match emotion.unwrap_or(Emotion::Neutral) {
            Emotion::Happy => "Happy",
            Emotion::Calm => "Calm",
            Emotion::Stressed => "Stressed",
            Emotion::Tired => "Tired",
            Emotion::Excited => "Excited",
            Emotion::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An activity imported from a fitness tracker and attached to a moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StravaActivity {
    #[serde(rename = "type")]
    pub kind: String,
    pub distance: String,
    pub duration: String,
    pub calories: u32,
}

/// A single user-logged entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moment {
    pub id: String,
    pub text: String,
    /// Local time of day at creation, `HH:MM`.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<Emotion>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strava_activity: Option<StravaActivity>,
}

impl Moment {
    /// Creates a new moment from user text, deriving its emotion and tags.
    ///
    /// Blank text is rejected with `PortError::InvalidInput`; the stored text
    /// is kept exactly as entered.
    pub fn record(
        text: &str,
        classifier: &dyn MomentClassifier,
        now: NaiveTime,
    ) -> PortResult<Self> {
        if text.trim().is_empty() {
            return Err(PortError::InvalidInput(
                "A moment needs some text.".to_string(),
            ));
        }

        let classification = classifier.classify(text);
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            timestamp: now.format("%H:%M").to_string(),
            emotion: Some(classification.emotion),
            tags: classification.tags,
            location: None,
            weather: None,
            strava_activity: None,
        })
    }
}

//=========================================================================================
// Daily Summary
//=========================================================================================

/// A short callout, optionally traceable to the moment it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_moment_id: Option<String>,
}

/// A follow-up recommendation for the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetroAction {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// The synthesized narrative for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub title: String,
    pub story: String,
    /// Always within `MOOD_MIN..=MOOD_MAX`.
    pub mood: u8,
    pub weather_context: String,
    pub highlights: Vec<Highlight>,
    pub actions: Vec<RetroAction>,
    pub tags: Vec<String>,
}

pub const MOOD_MIN: u8 = 1;
pub const MOOD_MAX: u8 = 10;

/// Calendar colouring bucket for a day's mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodBand {
    Bright,
    Steady,
    Low,
}

impl MoodBand {
    pub fn from_mood(mood: u8) -> Self {
        if mood >= 8 {
            MoodBand::Bright
        } else if mood >= 5 {
            MoodBand::Steady
        } else {
            MoodBand::Low
        }
    }
}

/// Everything stored for one calendar date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayData {
    pub moments: Vec<Moment>,
    pub summary: Option<DailySummary>,
}

//=========================================================================================
// User Profile (vault record)
//=========================================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "use")]
    pub usage: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostalAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "use")]
    pub usage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_type: Option<String>,
}

/// A phone number or email address with its kind (`MOBILE`, `PERSONAL`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Personal data stored in the vault. Every field is optional; nothing in the
/// core branches on the values beyond presence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub religion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<PersonName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<PostalAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_numbers: Option<ContactPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<ContactPoint>,
}

impl UserProfile {
    /// The demo profile inserted from the profile screen.
    pub fn sample() -> Self {
        let s = |v: &str| Some(v.to_string());
        Self {
            date_of_birth: s("1995-01-01"),
            nationality: s("vietnam"),
            gender: s("FEMALE"),
            race: s("ASIAN"),
            ethnicity: s("NOT_HISPANIC_OR_LATINO"),
            religion: s("CHRISTIAN_NON_CATHOLIC_OR_NON_SPECIFIC"),
            preferred_language: s("ENGLISH_LANGUAGE"),
            marital_status: s("MARRIED"),
            name: Some(PersonName {
                prefix: s("Mr."),
                first_name: s("Henry"),
                last_name: s("Mai"),
                suffix: s(""),
                usage: s("USUAL"),
                ..Default::default()
            }),
            addresses: Some(PostalAddress {
                full_name: s("Jane Doe"),
                usage: s("HOME"),
                line_1: s("123 Main Street"),
                line_2: s("Apt 4B"),
                city: s("San Francisco"),
                district: s("San Francisco County"),
                state: s("CA"),
                country: s("UNITED_STATES"),
                zip_code: s("94102"),
                address_type: s("BOTH"),
                ..Default::default()
            }),
            phone_numbers: Some(ContactPoint {
                value: s("+1-415-555-0123"),
                kind: s("MOBILE"),
            }),
            emails: Some(ContactPoint {
                value: s("jane.doe@example.com"),
                kind: s("PERSONAL"),
            }),
        }
    }

    /// Returns `self` with every field that is present in `other` replaced.
    /// Nested records are replaced whole, not merged.
    pub fn overlay(self, other: UserProfile) -> Self {
        Self {
            date_of_birth: other.date_of_birth.or(self.date_of_birth),
            nationality: other.nationality.or(self.nationality),
            gender: other.gender.or(self.gender),
            race: other.race.or(self.race),
            ethnicity: other.ethnicity.or(self.ethnicity),
            religion: other.religion.or(self.religion),
            preferred_language: other.preferred_language.or(self.preferred_language),
            marital_status: other.marital_status.or(self.marital_status),
            name: other.name.or(self.name),
            addresses: other.addresses.or(self.addresses),
            phone_numbers: other.phone_numbers.or(self.phone_numbers),
            emails: other.emails.or(self.emails),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == UserProfile::default()
    }
}

/// What the vault hands back after storing a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultReceipt {
    pub vault_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<serde_json::Map<String, serde_json::Value>>,
}
