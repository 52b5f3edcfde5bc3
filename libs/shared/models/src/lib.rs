pub mod doctor;
pub mod error;

pub use doctor::{BookedTimesResponse, DoctorEnvelope, DoctorRecord};
pub use error::AppError;
