use chrono::Weekday;

const WEEKDAY_ABBREVIATIONS: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];

/// Full English weekday name, the form doctors type into their schedule.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn weekday_abbreviation(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Booking/reschedule matching: the weekday's full name must appear verbatim
/// in `days`. An empty list matches every day. "Mon" does not match Monday.
pub fn match_exact_day_names(days: &[String], weekday: Weekday) -> bool {
    days.is_empty() || days.iter().any(|day| day == weekday_name(weekday))
}

/// Receptionist scheduling matching: maps full names and common
/// abbreviations onto canonical three-letter forms. Any entry containing the
/// literal `Mon-Fri` expands to the five weekdays. If nothing maps, the
/// result is Mon through Fri.
pub fn match_abbreviated_day_names(days: &[String]) -> Vec<&'static str> {
    let mut mapped: Vec<&'static str> = Vec::new();
    let mut push = |abbr: &'static str| {
        if !mapped.contains(&abbr) {
            mapped.push(abbr);
        }
    };

    for day in days {
        if day.contains("Mon-Fri") {
            for abbr in WEEKDAY_ABBREVIATIONS {
                push(abbr);
            }
            continue;
        }
        if let Some(abbr) = canonical_abbreviation(day) {
            push(abbr);
        }
    }

    if mapped.is_empty() {
        return WEEKDAY_ABBREVIATIONS.to_vec();
    }

    // Calendar order, Monday first.
    mapped.sort_by_key(|abbr| ORDER.iter().position(|o| o == abbr));
    mapped
}

pub fn abbreviated_days_include(abbreviations: &[&str], weekday: Weekday) -> bool {
    abbreviations.contains(&weekday_abbreviation(weekday))
}

const ORDER: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

fn canonical_abbreviation(day: &str) -> Option<&'static str> {
    match day.trim().to_ascii_lowercase().as_str() {
        "monday" | "mon" => Some("Mon"),
        "tuesday" | "tue" | "tues" => Some("Tue"),
        "wednesday" | "wed" => Some("Wed"),
        "thursday" | "thu" | "thur" | "thurs" => Some("Thu"),
        "friday" | "fri" => Some("Fri"),
        "saturday" | "sat" => Some("Sat"),
        "sunday" | "sun" => Some("Sun"),
        _ => None,
    }
}
