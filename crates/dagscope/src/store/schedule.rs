//! Next-run computation for imported cron schedules.
//!
//! Import rows carry classic five-field expressions
//! (`minute hour day-of-month month day-of-week`, Sunday = 0). The `cron`
//! crate parses six or seven fields with a leading seconds field and
//! numbers weekdays from Sunday = 1, so five-field input is translated
//! before parsing. Six/seven-field expressions and `@` shorthands such as
//! `@daily` are passed through unchanged.

use chrono::{DateTime, SecondsFormat, Utc};
use cron::Schedule;
use std::str::FromStr;

/// Next execution of `expression` strictly after `now`, as RFC 3339.
///
/// Returns `None` for an unparseable expression or one that never fires.
pub(crate) fn next_execution(expression: &str, now: DateTime<Utc>) -> Option<String> {
    let normalized = normalize(expression.trim());
    let schedule = match Schedule::from_str(&normalized) {
        Ok(schedule) => schedule,
        Err(e) => {
            tracing::debug!(expression, error = %e, "Ignoring invalid cron expression");
            return None;
        }
    };

    schedule
        .after(&now)
        .next()
        .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true))
}

fn normalize(expression: &str) -> String {
    let fields: Vec<&str> = expression.split_whitespace().collect();
    match fields.as_slice() {
        [minute, hour, day, month, weekday] => {
            format!("0 {minute} {hour} {day} {month} {}", shift_weekdays(weekday))
        }
        _ => expression.to_string(),
    }
}

/// Renumber numeric weekdays from Sunday = 0 (7 also Sunday) to Sunday = 1.
///
/// Step values after `/` are counts, not weekdays, and stay as they are.
fn shift_weekdays(field: &str) -> String {
    field
        .split(',')
        .map(|part| match part.split_once('/') {
            Some((range, step)) => format!("{}/{step}", shift_range(range)),
            None => shift_range(part),
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn shift_range(range: &str) -> String {
    range
        .split('-')
        .map(|token| match token.parse::<u8>() {
            Ok(0 | 7) => "1".to_string(),
            Ok(day) => day.saturating_add(1).to_string(),
            Err(_) => token.to_string(),
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        // Thursday
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).unwrap()
    }

    #[rstest]
    #[case("0 0 * * *", "2026-01-16T00:00:00Z")]
    #[case("*/15 * * * *", "2026-01-15T10:45:00Z")]
    #[case("0 9 * * 1", "2026-01-19T09:00:00Z")]
    #[case("0 9 * * 0", "2026-01-18T09:00:00Z")]
    #[case("0 9 * * 1-5", "2026-01-16T09:00:00Z")]
    #[case("0 30 6 1 * *", "2026-02-01T06:30:00Z")]
    #[case("@daily", "2026-01-16T00:00:00Z")]
    fn valid_expressions_yield_next_run(#[case] expression: &str, #[case] expected: &str) {
        assert_eq!(next_execution(expression, now()).as_deref(), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("not a schedule")]
    #[case("61 * * * *")]
    #[case("* * *")]
    fn invalid_expressions_yield_none(#[case] expression: &str) {
        assert_eq!(next_execution(expression, now()), None);
    }

    #[test]
    fn weekday_steps_are_not_renumbered() {
        assert_eq!(shift_weekdays("0-6/2"), "1-7/2");
        assert_eq!(shift_weekdays("1,3,5"), "2,4,6");
        assert_eq!(shift_weekdays("MON-FRI"), "MON-FRI");
        assert_eq!(shift_weekdays("*"), "*");
    }
}
