//! services/api/src/adapters/vault.rs
//!
//! This module contains the adapter for the personal-data vault.
//! It implements the `ProfileVault` port from the `core` crate over the vault's
//! record API (`/v1/vaults/{vault_id}/{table}`).

use async_trait::async_trait;
use momo_core::{
    domain::{UserProfile, VaultReceipt},
    ports::{PortError, PortResult, ProfileVault},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info};

use crate::adapters::http::{service_error, transport_error};
use crate::config::VaultSettings;

const SERVICE: &str = "Vault";
const ACCOUNT_HEADER: &str = "X-SKYFLOW-ACCOUNT-ID";

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Serialize)]
struct InsertRequest<'a> {
    records: [InsertRecord<'a>; 1],
    tokenization: bool,
}

#[derive(Serialize)]
struct InsertRecord<'a> {
    fields: &'a UserProfile,
}

#[derive(Deserialize)]
struct RecordsResponse {
    #[serde(default)]
    records: Vec<StoredRecord>,
}

#[derive(Deserialize)]
struct StoredRecord {
    #[serde(default)]
    skyflow_id: Option<String>,
    #[serde(default)]
    tokens: Option<Map<String, Value>>,
    #[serde(default)]
    fields: Option<UserProfile>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ProfileVault` against a tokenizing vault.
///
/// Built without settings, every call fails with a configuration error.
#[derive(Clone)]
pub struct SkyflowVaultAdapter {
    client: reqwest::Client,
    settings: Option<VaultSettings>,
}

impl SkyflowVaultAdapter {
    pub fn new(client: reqwest::Client, settings: Option<VaultSettings>) -> Self {
        Self { client, settings }
    }

    fn settings(&self) -> PortResult<&VaultSettings> {
        self.settings.as_ref().ok_or_else(|| {
            PortError::Configuration(
                "Vault configuration is incomplete. Check the SKYFLOW_* variables.".to_string(),
            )
        })
    }

    fn table_url(settings: &VaultSettings) -> String {
        format!(
            "{}/v1/vaults/{}/{}",
            settings.vault_url, settings.vault_id, settings.table_name
        )
    }

    /// Sends a prepared request and returns the parsed records body.
    async fn send(&self, request: reqwest::RequestBuilder) -> PortResult<RecordsResponse> {
        let settings = self.settings()?;
        let response = request
            .bearer_auth(&settings.bearer_token)
            .header(ACCOUNT_HEADER, &settings.account_id)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        if !status.is_success() {
            error!(status = status.as_u16(), "Vault returned an error");
            return Err(service_error(SERVICE, status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| PortError::MalformedResponse(format!("unexpected vault response: {e}")))
    }
}

//=========================================================================================
// `ProfileVault` Trait Implementation
//=========================================================================================

#[async_trait]
impl ProfileVault for SkyflowVaultAdapter {
    async fn insert_profile(&self, profile: &UserProfile) -> PortResult<VaultReceipt> {
        let settings = self.settings()?;
        let body = InsertRequest {
            records: [InsertRecord { fields: profile }],
            tokenization: true,
        };
        let request = self.client.post(Self::table_url(settings)).json(&body);

        let record = self
            .send(request)
            .await?
            .records
            .into_iter()
            .next()
            .ok_or_else(|| {
                PortError::MalformedResponse("vault stored no record".to_string())
            })?;

        let vault_id = record.skyflow_id.ok_or_else(|| {
            PortError::MalformedResponse("vault record has no id".to_string())
        })?;
        info!(%vault_id, "Profile stored in vault");

        Ok(VaultReceipt {
            vault_id,
            tokens: record.tokens,
        })
    }

    async fn fetch_profile(&self) -> PortResult<Option<UserProfile>> {
        let settings = self.settings()?;
        let request = self
            .client
            .get(Self::table_url(settings))
            .query(&[("redaction", "PLAIN_TEXT"), ("limit", "1")]);

        let profile = self
            .send(request)
            .await?
            .records
            .into_iter()
            .next()
            .and_then(|r| r.fields);
        info!(found = profile.is_some(), "Fetched profile from vault");
        Ok(profile)
    }
}
