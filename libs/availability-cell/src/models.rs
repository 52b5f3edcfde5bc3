use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use thiserror::Error;

use shared_models::error::AppError;

pub const BOOKING_HORIZON_DAYS: u32 = 30;
pub const RESCHEDULE_HORIZON_DAYS: u32 = 14;
pub const MAX_HORIZON_DAYS: u32 = 365;

pub const DEFAULT_START: &str = "09:00";
pub const DEFAULT_END: &str = "17:00";

// ==============================================================================
// PARSED SCHEDULE
// ==============================================================================

/// Structured form of a doctor's free-text working hours.
///
/// `start` and `end` are always well-formed `HH:mm`; they fall back to
/// 09:00 and 17:00 when the text carries no usable range. `time` is the
/// `"HH:mm - HH:mm"` display string and stays empty unless both sides of
/// the range normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHoursSpec {
    pub days: Vec<String>,
    pub start: String,
    pub end: String,
    pub time: String,
}

impl Default for WorkingHoursSpec {
    fn default() -> Self {
        Self {
            days: Vec::new(),
            start: DEFAULT_START.to_string(),
            end: DEFAULT_END.to_string(),
            time: String::new(),
        }
    }
}

impl WorkingHoursSpec {
    /// An empty day list means the doctor works every day.
    pub fn works_every_day(&self) -> bool {
        self.days.is_empty()
    }
}

/// What the scheduling form shows while an admin types working hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHoursPreview {
    #[serde(flatten)]
    pub spec: WorkingHoursSpec,
    pub abbreviated_days: Vec<String>,
    pub slots: Vec<String>,
}

// ==============================================================================
// CALL-SITE POLICY
// ==============================================================================

/// Which weekday matcher a call site uses. Booking and rescheduling compare
/// day names verbatim; receptionist scheduling normalizes abbreviations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayMatching {
    #[default]
    Exact,
    Abbreviated,
}

/// Whether the doctor's availability flag short-circuits date computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityGate {
    #[default]
    Enforce,
    Ignore,
}

impl AvailabilityGate {
    pub fn allows(&self, doctor_available: bool) -> bool {
        match self {
            AvailabilityGate::Enforce => doctor_available,
            AvailabilityGate::Ignore => true,
        }
    }
}

// ==============================================================================
// REQUESTS / RESPONSES
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AvailableDatesQuery {
    pub horizon_days: Option<u32>,
    pub matching: Option<DayMatching>,
    pub gate: Option<AvailabilityGate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailableTimesQuery {
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotsQuery {
    pub start: String,
    pub end: String,
    pub granularity: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkingHoursPreviewRequest {
    pub working_hours: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableDatesResponse {
    pub doctor_id: String,
    pub horizon_days: u32,
    pub dates: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableTimesResponse {
    pub doctor_id: String,
    pub date: String,
    pub times: Vec<String>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum AvailabilityError {
    #[error("Doctor not found: {0}")]
    DoctorNotFound(String),

    #[error("Horizon must be between 1 and {max} days, got {got}")]
    InvalidHorizon { got: u32, max: u32 },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Slot granularity must be positive")]
    InvalidGranularity,

    #[error("Backend unavailable: {0}")]
    Backend(String),
}

impl From<AvailabilityError> for AppError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::DoctorNotFound(_) => AppError::NotFound(err.to_string()),
            AvailabilityError::InvalidHorizon { .. }
            | AvailabilityError::InvalidDate(_)
            | AvailabilityError::InvalidGranularity => AppError::ValidationError(err.to_string()),
            AvailabilityError::Backend(_) => AppError::ExternalService(err.to_string()),
        }
    }
}

pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, AvailabilityError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AvailabilityError::InvalidDate(raw.to_string()))
}

pub fn validate_horizon(horizon_days: u32) -> Result<u32, AvailabilityError> {
    if horizon_days == 0 || horizon_days > MAX_HORIZON_DAYS {
        return Err(AvailabilityError::InvalidHorizon {
            got: horizon_days,
            max: MAX_HORIZON_DAYS,
        });
    }
    Ok(horizon_days)
}

/// Doctor ids become a single backend path segment. Anything that could
/// address a different resource (separators, dot segments, control
/// characters) is treated as an unknown doctor and never sent upstream.
pub fn validate_doctor_id(raw: &str) -> Result<&str, AvailabilityError> {
    let id = raw.trim();
    let addresses_other_resource = id.is_empty()
        || id == "."
        || id == ".."
        || id.chars().any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_control());

    if addresses_other_resource {
        return Err(AvailabilityError::DoctorNotFound(raw.to_string()));
    }
    Ok(id)
}
