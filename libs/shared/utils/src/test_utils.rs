use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;

pub struct TestConfig {
    pub hms_api_url: String,
    pub hms_api_token: Option<String>,
    pub cache_ttl_secs: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            hms_api_url: "http://localhost:5000".to_string(),
            hms_api_token: Some("test-service-token".to_string()),
            cache_ttl_secs: 0,
        }
    }
}

impl TestConfig {
    /// Point the config at a running mock backend.
    pub fn with_backend(url: impl Into<String>) -> Self {
        Self {
            hms_api_url: url.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            hms_api_url: self.hms_api_url.clone(),
            hms_api_token: self.hms_api_token.clone(),
            booked_times_cache_ttl_secs: self.cache_ttl_secs,
            ..AppConfig::default()
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestDoctor {
    pub id: String,
    pub working_hours: Option<String>,
    pub availability: bool,
}

impl Default for TestDoctor {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            working_hours: Some("Monday, Wednesday, Friday 09:00 - 17:00".to_string()),
            availability: true,
        }
    }
}

impl TestDoctor {
    pub fn new(working_hours: &str) -> Self {
        Self {
            working_hours: Some(working_hours.to_string()),
            ..Self::default()
        }
    }

    pub fn unavailable(working_hours: &str) -> Self {
        Self {
            availability: false,
            ..Self::new(working_hours)
        }
    }

    pub fn without_schedule() -> Self {
        Self {
            working_hours: None,
            ..Self::default()
        }
    }
}

pub struct MockBackendResponses;

impl MockBackendResponses {
    pub fn doctor_response(doctor: &TestDoctor) -> Value {
        json!({
            "id": doctor.id,
            "name": "Dr. Test",
            "specialization": "General Practice",
            "workingHours": doctor.working_hours,
            "availability": doctor.availability,
            "createdAt": "2026-01-01T00:00:00Z"
        })
    }

    pub fn wrapped_doctor_response(doctor: &TestDoctor) -> Value {
        json!({ "doctor": Self::doctor_response(doctor) })
    }

    pub fn booked_times_response(times: &[&str]) -> Value {
        json!({ "bookedTimes": times })
    }

    pub fn error_response(message: &str) -> Value {
        json!({ "message": message })
    }
}

/// First date on or after `from` that falls on `weekday`.
pub fn next_weekday(from: NaiveDate, weekday: Weekday) -> NaiveDate {
    let ahead = (7 + weekday.num_days_from_monday() - from.weekday().num_days_from_monday()) % 7;
    from.checked_add_days(Days::new(u64::from(ahead))).unwrap_or(from)
}
