use std::sync::Arc;

use tracing::{debug, instrument, warn};

use shared_backend::BackendClient;
use shared_models::doctor::{DoctorEnvelope, DoctorRecord};

use crate::models::{validate_doctor_id, AvailabilityError};

pub struct DoctorService {
    backend: Arc<BackendClient>,
}

impl DoctorService {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    /// Fetch the doctor record; only `workingHours` and `availability` matter here.
    #[instrument(skip(self, auth_token))]
    pub async fn get_doctor(
        &self,
        doctor_id: &str,
        auth_token: Option<&str>,
    ) -> Result<DoctorRecord, AvailabilityError> {
        let doctor_id = validate_doctor_id(doctor_id)?;
        debug!("Fetching doctor: {}", doctor_id);

        let envelope: DoctorEnvelope = self
            .backend
            .get_json(&["api", "doctors", doctor_id], &[], auth_token)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    AvailabilityError::DoctorNotFound(doctor_id.to_string())
                } else {
                    warn!("Failed to fetch doctor {}: {}", doctor_id, e);
                    AvailabilityError::Backend(e.to_string())
                }
            })?;

        Ok(envelope.into_record())
    }
}
