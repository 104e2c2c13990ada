use chrono::{DateTime, Duration, Utc};

/// Formats a coin amount with thousands separators, e.g. `$1,234,567`.
pub fn format_coins(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Human readable distance between `then` and `now`.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);

    let years = seconds / 31_536_000;
    if years >= 1 {
        return plural(years, "year");
    }
    let months = seconds / 2_592_000;
    if months >= 1 {
        return plural(months, "month");
    }
    let days = seconds / 86_400;
    if days >= 1 {
        return plural(days, "day");
    }
    let hours = seconds / 3_600;
    if hours >= 1 {
        return plural(hours, "hour");
    }
    let minutes = seconds / 60;
    if minutes >= 1 {
        return plural(minutes, "minute");
    }
    if seconds < 10 {
        return "just now".to_string();
    }
    format!("{} seconds ago", seconds)
}

/// Remaining time as a compact countdown, e.g. `5h 12m` or `45s`.
pub fn format_countdown(remaining: Duration) -> String {
    let seconds = remaining.num_seconds();
    if seconds <= 0 {
        return "expired".to_string();
    }
    let hours = seconds / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coins_are_grouped_in_threes() {
        assert_eq!(format_coins(0), "$0");
        assert_eq!(format_coins(950), "$950");
        assert_eq!(format_coins(1_234), "$1,234");
        assert_eq!(format_coins(1_234_567), "$1,234,567");
        assert_eq!(format_coins(-5_000), "-$5,000");
    }

    #[test]
    fn time_ago_picks_the_largest_unit() {
        let now = Utc::now();
        assert_eq!(time_ago(now - Duration::seconds(3), now), "just now");
        assert_eq!(time_ago(now - Duration::seconds(42), now), "42 seconds ago");
        assert_eq!(time_ago(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(time_ago(now - Duration::hours(5), now), "5 hours ago");
        assert_eq!(time_ago(now - Duration::days(1), now), "1 day ago");
        assert_eq!(time_ago(now - Duration::days(400), now), "1 year ago");
    }

    #[test]
    fn countdown_is_compact() {
        assert_eq!(format_countdown(Duration::seconds(45)), "45s");
        assert_eq!(format_countdown(Duration::seconds(150)), "2m 30s");
        assert_eq!(format_countdown(Duration::hours(5) + Duration::minutes(7)), "5h 07m");
        assert_eq!(format_countdown(Duration::seconds(-3)), "expired");
    }
}
