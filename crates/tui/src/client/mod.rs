use ledger::Bill;
use reqwest::Url;
use serde::Serialize;
use thiserror::Error;

use crate::error::{AppError, Result};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct SyncPayload<'a> {
    bills: &'a [Bill],
}

/// One-shot exporter for the spreadsheet endpoint.
///
/// Repeated pushes resend the full ledger; the remote side may grow
/// duplicate rows and that is accepted behavior.
#[derive(Debug, Clone)]
pub struct SheetClient {
    endpoint: Url,
    http: reqwest::Client,
}

impl SheetClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| AppError::Terminal(format!("invalid sheet_url: {err}")))?;
        Ok(Self {
            endpoint,
            http: reqwest::Client::new(),
        })
    }

    /// Submits the full bill list as `{"bills": [...]}`.
    ///
    /// Any transport-level success counts as synced; the response status
    /// is not inspected and the body is read as text and discarded.
    pub async fn push_bills(&self, bills: &[Bill]) -> std::result::Result<(), ClientError> {
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(&SyncPayload { bills })
            .send()
            .await?;

        let _ = res.text().await?;
        Ok(())
    }
}
