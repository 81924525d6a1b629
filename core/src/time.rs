use anyhow::{anyhow, Result};
use chrono::{Datelike, Days, Local, Months, NaiveDate, Weekday};

/// Parses a due date typed on the command line.
///
/// Accepts `today`, `tomorrow`, `eow`, `eom`, relative offsets (`+3d`,
/// `+2w`, `+1m`), weekdays (`fri`, `2:fri`) and plain `YYYY-MM-DD`.
pub fn parse_due_date(input: &str) -> Result<NaiveDate> {
    parse_due_date_from(input, Local::now().date_naive())
}

pub fn parse_due_date_from(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty date string"));
    }

    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => return add_days(today, 1),
        "eow" => {
            let days_to_sunday = (7 - today.weekday().num_days_from_sunday() as u64) % 7;
            return add_days(today, days_to_sunday);
        }
        "eom" => {
            let first = today.with_day(1).ok_or_else(|| anyhow!("Invalid date"))?;
            return first
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt())
                .ok_or_else(|| anyhow!("Date out of range"));
        }
        _ => {}
    }

    if let Some(rest) = input.strip_prefix('+') {
        if rest.len() < 2 {
            return Err(anyhow!("Invalid relative format"));
        }
        let (num_str, unit) = rest.split_at(rest.len() - 1);
        let count: u32 = num_str.parse().map_err(|_| anyhow!("Invalid relative format"))?;

        return match unit {
            "d" => add_days(today, count as u64),
            "w" => add_days(today, count as u64 * 7),
            // Clamps to the last day of a shorter month.
            "m" => today
                .checked_add_months(Months::new(count))
                .ok_or_else(|| anyhow!("Date out of range")),
            _ => Err(anyhow!("Unknown unit in relative time: {}", unit)),
        };
    }

    if let Some((count, day_str)) = parse_weekday_token(input) {
        if let Ok(target) = parse_weekday_str(day_str) {
            let mut days_needed = target.num_days_from_sunday() as i64
                - today.weekday().num_days_from_sunday() as i64;
            if days_needed <= 0 {
                days_needed += 7;
            }
            // 1:fri is the next Friday, 2:fri the one after.
            let extra_weeks = (count.max(1) - 1) as u64;
            let days_needed = extra_weeks
                .checked_mul(7)
                .and_then(|extra| extra.checked_add(days_needed as u64))
                .ok_or_else(|| anyhow!("Date out of range"))?;
            return add_days(today, days_needed);
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| anyhow!("Could not parse date: {}", input))
}

fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| anyhow!("Date out of range"))
}

fn parse_weekday_token(input: &str) -> Option<(i64, &str)> {
    match input.split_once(':') {
        Some((count, day)) => count.parse::<i64>().ok().map(|c| (c, day)),
        None => Some((1, input)),
    }
}

fn parse_weekday_str(s: &str) -> Result<Weekday> {
    match s.to_lowercase().as_str() {
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        "sun" | "sunday" => Ok(Weekday::Sun),
        _ => Err(anyhow!("Invalid weekday")),
    }
}
