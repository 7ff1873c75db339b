//! crates/momo_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete text-generation and vault services.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{DailySummary, Moment, UserProfile, VaultReceipt};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// The error type shared by all port operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PortError {
    /// A credential or endpoint the operation needs was never configured.
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The remote endpoint could not be reached (transport failure or timeout).
    #[error("Network error: {0}")]
    Network(String),
    /// The remote endpoint answered with a non-success status.
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// A story for this date is already being generated.
    #[error("A story for {0} is already being generated")]
    InFlight(NaiveDate),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    /// Produces the daily summary for one date's moments, in input order.
    async fn generate_summary(&self, moments: &[Moment]) -> PortResult<DailySummary>;
}

#[async_trait]
pub trait ProfileVault: Send + Sync {
    /// Stores a profile and returns the vault's id for the new record.
    async fn insert_profile(&self, profile: &UserProfile) -> PortResult<VaultReceipt>;

    /// Fetches the first stored profile in plain text, if any.
    async fn fetch_profile(&self) -> PortResult<Option<UserProfile>>;
}
