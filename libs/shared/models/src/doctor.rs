use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Doctor record as served by the HMS backend. Only the fields the
/// availability computation reads are modelled; everything else is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub working_hours: Option<String>,
    #[serde(default)]
    pub availability: bool,
}

impl DoctorRecord {
    pub fn new(id: impl Into<String>, working_hours: Option<&str>, availability: bool) -> Self {
        Self {
            id: id.into(),
            working_hours: working_hours.map(str::to_string),
            availability,
        }
    }

    pub fn working_hours_text(&self) -> &str {
        self.working_hours.as_deref().unwrap_or("")
    }
}

/// Some backend routes wrap the record as `{ "doctor": { ... } }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DoctorEnvelope {
    Wrapped { doctor: DoctorRecord },
    Bare(DoctorRecord),
}

impl DoctorEnvelope {
    pub fn into_record(self) -> DoctorRecord {
        match self {
            DoctorEnvelope::Wrapped { doctor } => doctor,
            DoctorEnvelope::Bare(doctor) => doctor,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedTimesResponse {
    pub booked_times: Vec<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

// Free-text fields are entered by hand and occasionally stored as null or a
// non-string value; those read as "no schedule".
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}
