#![allow(dead_code)]

use api_lib::{config::Config, web::state::AppState};
use async_trait::async_trait;
use momo_core::{
    day_store::DayStore,
    domain::{DailySummary, Moment, UserProfile, VaultReceipt},
    mock_summary::generate_mock,
    ports::{PortError, PortResult, ProfileVault, SummaryGenerator},
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Config with the given step length and nothing else configured.
pub fn config_with_step(step_millis: u64) -> Arc<Config> {
    let step = step_millis.to_string();
    Arc::new(
        Config::from_lookup(|key| match key {
            "PROCESSING_STEP_MILLIS" => Some(step.clone()),
            _ => None,
        })
        .unwrap(),
    )
}

pub fn state(
    step_millis: u64,
    generator: Arc<dyn SummaryGenerator>,
    vault: Arc<dyn ProfileVault>,
) -> Arc<AppState> {
    Arc::new(AppState::new(
        config_with_step(step_millis),
        DayStore::new(),
        generator,
        vault,
    ))
}

pub fn moment(id: &str, text: &str) -> Moment {
    Moment {
        id: id.into(),
        text: text.into(),
        timestamp: "09:00".into(),
        emotion: None,
        tags: vec![],
        location: None,
        weather: None,
        strava_activity: None,
    }
}

//=========================================================================================
// Fake Generators
//=========================================================================================

/// Titles the summary after the moments it was given, after an optional delay.
pub struct EchoGenerator {
    pub delay: Duration,
}

#[async_trait]
impl SummaryGenerator for EchoGenerator {
    async fn generate_summary(&self, moments: &[Moment]) -> PortResult<DailySummary> {
        tokio::time::sleep(self.delay).await;
        let mut summary = generate_mock(moments);
        summary.title = moments
            .iter()
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join(" + ");
        Ok(summary)
    }
}

/// Waits until released, then echoes.
#[derive(Default)]
pub struct GatedGenerator {
    pub gate: Notify,
}

#[async_trait]
impl SummaryGenerator for GatedGenerator {
    async fn generate_summary(&self, moments: &[Moment]) -> PortResult<DailySummary> {
        self.gate.notified().await;
        let mut summary = generate_mock(moments);
        summary.title = format!("{} moments", moments.len());
        Ok(summary)
    }
}

pub struct FailingGenerator(pub PortError);

#[async_trait]
impl SummaryGenerator for FailingGenerator {
    async fn generate_summary(&self, _moments: &[Moment]) -> PortResult<DailySummary> {
        Err(self.0.clone())
    }
}

//=========================================================================================
// Fake Vault
//=========================================================================================

#[derive(Default)]
pub struct MemoryVault {
    pub stored: Mutex<Vec<UserProfile>>,
}

#[async_trait]
impl ProfileVault for MemoryVault {
    async fn insert_profile(&self, profile: &UserProfile) -> PortResult<VaultReceipt> {
        let mut stored = self.stored.lock().unwrap();
        stored.push(profile.clone());
        Ok(VaultReceipt {
            vault_id: format!("rec-{}", stored.len()),
            tokens: None,
        })
    }

    async fn fetch_profile(&self) -> PortResult<Option<UserProfile>> {
        Ok(self.stored.lock().unwrap().first().cloned())
    }
}

/// A vault that was never configured.
pub struct UnconfiguredVault;

#[async_trait]
impl ProfileVault for UnconfiguredVault {
    async fn insert_profile(&self, _profile: &UserProfile) -> PortResult<VaultReceipt> {
        Err(PortError::Configuration("vault not configured".into()))
    }

    async fn fetch_profile(&self) -> PortResult<Option<UserProfile>> {
        Err(PortError::Configuration("vault not configured".into()))
    }
}
