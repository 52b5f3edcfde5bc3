use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::models::{WorkingHoursSpec, DEFAULT_END, DEFAULT_START};

/// `H:mm` / `HH:mm`, optionally followed by an AM/PM marker.
const TIME_TOKEN: &str = r"\d{1,2}:\d{2}(?:\s*(?:AM|PM))?";

static PARSER: LazyLock<WorkingHoursParser> = LazyLock::new(WorkingHoursParser::new);

/// Parses the free-text working hours doctors and admins type into their
/// profile, e.g. `"Monday, Wednesday 9:00 AM - 5:00 PM"`.
///
/// Never fails: anything it cannot read falls back to "every day,
/// 09:00 - 17:00".
pub struct WorkingHoursParser {
    days_and_range: Regex,
    range_only: Regex,
    twelve_hour: Regex,
    twenty_four_hour: Regex,
}

impl WorkingHoursParser {
    pub fn new() -> Self {
        Self {
            days_and_range: Regex::new(&format!(
                r"(?i)^(.*?)\s+({t})\s*-\s*({t})$",
                t = TIME_TOKEN
            ))
            .unwrap(),
            range_only: Regex::new(&format!(
                r"(?i)^\s*({t})\s*-\s*({t})\s*$",
                t = TIME_TOKEN
            ))
            .unwrap(),
            twelve_hour: Regex::new(r"(?i)^(\d{1,2}):(\d{2})\s*(AM|PM)$").unwrap(),
            twenty_four_hour: Regex::new(r"^([01]?\d|2\d):([0-5]\d)$").unwrap(),
        }
    }

    pub fn parse(&self, text: &str) -> WorkingHoursSpec {
        let text = text.trim();
        if text.is_empty() {
            return WorkingHoursSpec::default();
        }

        let (days_part, raw_start, raw_end) = self.split(text);

        let days: Vec<String> = days_part
            .split(',')
            .map(str::trim)
            .filter(|day| !day.is_empty())
            .map(str::to_string)
            .collect();

        let start = self.normalize_time(raw_start);
        let end = self.normalize_time(raw_end);

        let time = if start.is_empty() || end.is_empty() {
            String::new()
        } else {
            format!("{} - {}", start, end)
        };

        let spec = WorkingHoursSpec {
            days,
            start: if start.is_empty() { DEFAULT_START.to_string() } else { start },
            end: if end.is_empty() { DEFAULT_END.to_string() } else { end },
            time,
        };

        debug!("Parsed working hours '{}' into {:?}", text, spec);
        spec
    }

    /// Splits into (days part, raw start, raw end). Tries "days + range",
    /// then "range only", then treats everything as days.
    fn split<'a>(&self, text: &'a str) -> (&'a str, &'a str, &'a str) {
        if let Some(caps) = self.days_and_range.captures(text) {
            return (
                caps.get(1).map_or("", |m| m.as_str().trim()),
                caps.get(2).map_or("", |m| m.as_str()),
                caps.get(3).map_or("", |m| m.as_str()),
            );
        }

        if let Some(caps) = self.range_only.captures(text) {
            return (
                "",
                caps.get(1).map_or("", |m| m.as_str()),
                caps.get(2).map_or("", |m| m.as_str()),
            );
        }

        (text, "", "")
    }

    /// Normalizes a raw time token to 24-hour `HH:mm`; returns an empty
    /// string for anything out of range or unreadable.
    pub fn normalize_time(&self, token: &str) -> String {
        let token = token.trim();
        if token.is_empty() {
            return String::new();
        }

        if let Some(caps) = self.twelve_hour.captures(token) {
            let hour: u32 = caps[1].parse().unwrap_or(0);
            let minute: u32 = caps[2].parse().unwrap_or(60);
            let is_pm = caps[3].eq_ignore_ascii_case("pm");

            if !(1..=12).contains(&hour) || minute > 59 {
                return String::new();
            }

            let hour = match (is_pm, hour) {
                (true, 12) => 12,
                (true, h) => h + 12,
                (false, 12) => 0,
                (false, h) => h,
            };
            return format!("{:02}:{:02}", hour, minute);
        }

        if let Some(caps) = self.twenty_four_hour.captures(token) {
            let hour: u32 = caps[1].parse().unwrap_or(24);
            let minute: u32 = caps[2].parse().unwrap_or(60);

            if hour > 23 {
                return String::new();
            }
            return format!("{:02}:{:02}", hour, minute);
        }

        String::new()
    }
}

impl Default for WorkingHoursParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses with the process-wide parser instance.
pub fn parse_working_hours(text: &str) -> WorkingHoursSpec {
    PARSER.parse(text)
}

pub fn normalize_time(token: &str) -> String {
    PARSER.normalize_time(token)
}
