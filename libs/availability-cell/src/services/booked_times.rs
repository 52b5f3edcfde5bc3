use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, instrument};

use shared_backend::BackendClient;
use shared_models::doctor::BookedTimesResponse;

use crate::models::validate_doctor_id;

/// Source of already-reserved slot start times for a doctor on a date.
#[async_trait]
pub trait BookedTimesLookup: Send + Sync {
    async fn booked_times(&self, doctor_id: &str, date: NaiveDate) -> Result<Vec<String>>;
}

#[async_trait]
impl<T: BookedTimesLookup + ?Sized> BookedTimesLookup for Arc<T> {
    async fn booked_times(&self, doctor_id: &str, date: NaiveDate) -> Result<Vec<String>> {
        (**self).booked_times(doctor_id, date).await
    }
}

/// Reads `GET /api/doctors/{id}/booked-times?date=YYYY-MM-DD` from the HMS backend.
pub struct HttpBookedTimesLookup {
    backend: Arc<BackendClient>,
    auth_token: Option<String>,
}

impl HttpBookedTimesLookup {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self {
            backend,
            auth_token: None,
        }
    }

    pub fn with_auth_token(mut self, auth_token: Option<String>) -> Self {
        self.auth_token = auth_token;
        self
    }
}

#[async_trait]
impl BookedTimesLookup for HttpBookedTimesLookup {
    #[instrument(skip(self))]
    async fn booked_times(&self, doctor_id: &str, date: NaiveDate) -> Result<Vec<String>> {
        let doctor_id = validate_doctor_id(doctor_id)?;
        let date_param = date.format("%Y-%m-%d").to_string();

        let response: BookedTimesResponse = self
            .backend
            .get_json(
                &["api", "doctors", doctor_id, "booked-times"],
                &[("date", date_param.as_str())],
                self.auth_token.as_deref(),
            )
            .await?;

        debug!("Doctor {} has {} booked times on {}", doctor_id, response.booked_times.len(), date);
        Ok(response.booked_times)
    }
}

/// Brings a booked time to zero-padded `HH:mm`. Records sometimes carry
/// seconds (`HH:mm:ss`) or an unpadded hour; anything unreadable is dropped.
pub fn normalize_booked_time(raw: &str) -> Option<String> {
    let raw = raw.trim();

    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
        .map(|t| t.format("%H:%M").to_string())
}
