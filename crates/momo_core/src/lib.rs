pub mod classifier;
pub mod day_store;
pub mod demo;
pub mod domain;
pub mod mock_summary;
pub mod ports;
pub mod summary_prompt;

pub use classifier::{classify, Classification, KeywordClassifier, MomentClassifier};
pub use day_store::{DayOverview, DayStore};
pub use domain::{
    DailySummary, DayData, Emotion, Highlight, Moment, MoodBand, RetroAction, StravaActivity,
    UserProfile, VaultReceipt,
};
pub use mock_summary::{generate_mock, MockSummaryGenerator};
pub use ports::{PortError, PortResult, ProfileVault, SummaryGenerator};
