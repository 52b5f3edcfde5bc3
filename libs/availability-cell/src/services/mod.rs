pub mod working_hours;
pub mod slots;
pub mod weekdays;
pub mod availability;
pub mod booked_times;
pub mod doctor;
pub mod selection;

pub use working_hours::{parse_working_hours, WorkingHoursParser};
pub use slots::{generate_time_slots, SlotGenerator, DEFAULT_SLOT_MINUTES};
pub use weekdays::{match_abbreviated_day_names, match_exact_day_names, weekday_abbreviation, weekday_name};
pub use availability::{AvailabilityResolver, Clock, FixedClock, SystemClock};
pub use booked_times::{normalize_booked_time, BookedTimesLookup, HttpBookedTimesLookup};
pub use doctor::DoctorService;
pub use selection::{AvailabilityController, Selection, SelectionTicket, SelectionTracker};
