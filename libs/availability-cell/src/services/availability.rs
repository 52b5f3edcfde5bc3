use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, Days, Local, NaiveDate};
use tracing::{debug, instrument, warn};

use shared_models::doctor::DoctorRecord;

use crate::models::{AvailabilityGate, DayMatching, WorkingHoursSpec};
use crate::services::booked_times::{normalize_booked_time, BookedTimesLookup};
use crate::services::slots::SlotGenerator;
use crate::services::weekdays::{
    abbreviated_days_include, match_abbreviated_day_names, match_exact_day_names,
};
use crate::services::working_hours::parse_working_hours;

/// Supplies "today" for the look-ahead window.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The host's local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Computes bookable dates and times for a doctor. Stateless apart from its
/// collaborators, so one instance can serve concurrent requests.
pub struct AvailabilityResolver<L> {
    lookup: L,
    clock: Arc<dyn Clock>,
    slots: SlotGenerator,
}

impl<L: BookedTimesLookup> AvailabilityResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self::with_clock(lookup, Arc::new(SystemClock))
    }

    pub fn with_clock(lookup: L, clock: Arc<dyn Clock>) -> Self {
        Self {
            lookup,
            clock,
            slots: SlotGenerator::default(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Dates in `[today, today + horizon_days)` whose full weekday name
    /// appears verbatim in the doctor's working days.
    pub fn available_dates(&self, doctor: &DoctorRecord, horizon_days: u32) -> Vec<String> {
        let spec = parse_working_hours(doctor.working_hours_text());
        dates_in_horizon(&spec, self.today(), horizon_days, DayMatching::Exact)
    }

    /// Receptionist variant: weekday names are abbreviation-normalized first.
    pub fn available_dates_abbreviated(&self, doctor: &DoctorRecord, horizon_days: u32) -> Vec<String> {
        let spec = parse_working_hours(doctor.working_hours_text());
        dates_in_horizon(&spec, self.today(), horizon_days, DayMatching::Abbreviated)
    }

    /// Date computation with the call site's matching and gating policy made explicit.
    pub fn available_dates_with(
        &self,
        doctor: &DoctorRecord,
        horizon_days: u32,
        matching: DayMatching,
        gate: AvailabilityGate,
    ) -> Vec<String> {
        if !gate.allows(doctor.availability) {
            debug!("Doctor {} is marked unavailable, no dates offered", doctor.id);
            return Vec::new();
        }

        match matching {
            DayMatching::Exact => self.available_dates(doctor, horizon_days),
            DayMatching::Abbreviated => self.available_dates_abbreviated(doctor, horizon_days),
        }
    }

    /// Open slot start times for `date`: the doctor's candidate slots minus
    /// whatever the backend reports as booked. A failed lookup counts as
    /// nothing booked.
    #[instrument(skip(self, doctor), fields(doctor_id = %doctor.id))]
    pub async fn available_times(&self, doctor: &DoctorRecord, date: NaiveDate) -> Vec<String> {
        let spec = parse_working_hours(doctor.working_hours_text());
        let candidates = self.slots.generate(&spec.start, &spec.end);

        let booked = match self.lookup.booked_times(&doctor.id, date).await {
            Ok(booked) => booked,
            Err(e) => {
                warn!("Booked-times lookup failed for doctor {} on {}: {}", doctor.id, date, e);
                Vec::new()
            }
        };

        let open = remove_booked(candidates, &booked);
        debug!("{} open slots for doctor {} on {}", open.len(), doctor.id, date);
        open
    }
}

/// Walks `horizon_days` calendar days from `today` and keeps those the
/// schedule covers, formatted `YYYY-MM-DD`.
pub fn dates_in_horizon(
    spec: &WorkingHoursSpec,
    today: NaiveDate,
    horizon_days: u32,
    matching: DayMatching,
) -> Vec<String> {
    let abbreviated = match matching {
        DayMatching::Abbreviated => Some(match_abbreviated_day_names(&spec.days)),
        DayMatching::Exact => None,
    };

    (0..horizon_days)
        .filter_map(|offset| today.checked_add_days(Days::new(u64::from(offset))))
        .filter(|date| match &abbreviated {
            Some(set) => abbreviated_days_include(set, date.weekday()),
            None => match_exact_day_names(&spec.days, date.weekday()),
        })
        .map(|date| date.format("%Y-%m-%d").to_string())
        .collect()
}

/// Candidate order is preserved; booked values are normalized to `HH:mm` first.
pub fn remove_booked(candidates: Vec<String>, booked: &[String]) -> Vec<String> {
    let booked: HashSet<String> = booked
        .iter()
        .filter_map(|raw| normalize_booked_time(raw))
        .collect();

    candidates
        .into_iter()
        .filter(|slot| !booked.contains(slot))
        .collect()
}
