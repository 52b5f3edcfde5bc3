use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use shared_models::doctor::DoctorRecord;

use crate::services::availability::AvailabilityResolver;
use crate::services::booked_times::BookedTimesLookup;

/// Tag handed to each lookup so a slow, older response can be recognised
/// and dropped once a newer selection has been issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SelectionTicket(u64);

#[derive(Debug, Default)]
pub struct SelectionTracker {
    latest: AtomicU64,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> SelectionTicket {
        SelectionTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: SelectionTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub doctor_id: String,
    pub date: NaiveDate,
    pub times: Vec<String>,
}

/// Holds the open times for whatever doctor/date was picked last.
/// Last selection wins: a response that arrives after a newer selection was
/// made is discarded instead of overwriting the newer state.
pub struct AvailabilityController<L> {
    resolver: AvailabilityResolver<L>,
    tracker: SelectionTracker,
    current: Mutex<Option<Selection>>,
}

impl<L: BookedTimesLookup> AvailabilityController<L> {
    pub fn new(resolver: AvailabilityResolver<L>) -> Self {
        Self {
            resolver,
            tracker: SelectionTracker::new(),
            current: Mutex::new(None),
        }
    }

    pub fn resolver(&self) -> &AvailabilityResolver<L> {
        &self.resolver
    }

    /// Returns `None` when the result went stale before it could be published.
    pub async fn select(&self, doctor: &DoctorRecord, date: NaiveDate) -> Option<Vec<String>> {
        let ticket = self.tracker.issue();
        let times = self.resolver.available_times(doctor, date).await;

        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if !self.tracker.is_current(ticket) {
            debug!("Discarding stale availability for doctor {} on {}", doctor.id, date);
            return None;
        }

        *current = Some(Selection {
            doctor_id: doctor.id.clone(),
            date,
            times: times.clone(),
        });
        Some(times)
    }

    pub fn current(&self) -> Option<Selection> {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
