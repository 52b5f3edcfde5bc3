use chrono::{NaiveTime, Timelike};

pub const DEFAULT_SLOT_MINUTES: u32 = 30;

/// Produces slot start times between two `HH:mm` bounds.
#[derive(Debug, Clone, Copy)]
pub struct SlotGenerator {
    granularity_minutes: u32,
}

impl Default for SlotGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SLOT_MINUTES)
    }
}

impl SlotGenerator {
    pub fn new(granularity_minutes: u32) -> Self {
        Self { granularity_minutes }
    }

    pub fn granularity_minutes(&self) -> u32 {
        self.granularity_minutes
    }

    /// Every slot start from `start` stepping by the granularity while the
    /// start is strictly before `end`. Unreadable bounds, an empty window
    /// or a zero granularity yield no slots.
    pub fn generate(&self, start: &str, end: &str) -> Vec<String> {
        let (Some(start), Some(end)) = (minutes_since_midnight(start), minutes_since_midnight(end)) else {
            return Vec::new();
        };

        if start >= end || self.granularity_minutes == 0 {
            return Vec::new();
        }

        (start..end)
            .step_by(self.granularity_minutes as usize)
            .map(format_minutes)
            .collect()
    }
}

pub fn generate_time_slots(start: &str, end: &str, granularity_minutes: u32) -> Vec<String> {
    SlotGenerator::new(granularity_minutes).generate(start, end)
}

pub fn minutes_since_midnight(time: &str) -> Option<u32> {
    NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .ok()
        .map(|t| t.hour() * 60 + t.minute())
}

fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
