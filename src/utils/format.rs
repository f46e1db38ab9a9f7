/// Average one-way London to Tokyo flight, grams CO2e.
pub const LONDON_TO_TOKYO_G: f64 = 1_410_000.0;
/// CO2e absorbed by a tree in a year, grams.
pub const TREE_YEAR_G: f64 = 22_000.0;

/// Truncates (floors) `value` to `precision` decimals.
pub fn round(value: f64, precision: i32) -> f64 {
    let f = 10f64.powi(precision);
    (value * f).floor() / f
}

/// Number with thousands separators and at most three decimals, the way
/// `Number.toLocaleString("en-US")` prints it.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

pub fn render_cost(value: f64) -> String {
    if value > 100.0 {
        format!("£{}", format_number(round(value, 0)))
    } else if value > 1.0 {
        format!("£{}", format_number(round(value, 2)))
    } else {
        "< £1".to_string()
    }
}

/// `value` is in grams.
pub fn render_co2e(value: f64) -> String {
    if value >= 1e6 {
        format!("{} kg", format_number(round(value / 1000.0, 0)))
    } else if value >= 1000.0 {
        format!("{} kg", format_number(round(value / 1000.0, 1)))
    } else if value >= 1.0 {
        format!("{} g", format_number(round(value, 1)))
    } else if value >= 0.001 {
        format!("{} mg", format_number(round(value * 1000.0, 1)))
    } else {
        "< 1 mg".to_string()
    }
}

const TIME_UNITS: [(&str, f64, i32); 6] = [
    ("year", 3600.0 * 24.0 * 365.0, 2),
    ("month", 3600.0 * 24.0 * 30.0, 2),
    ("week", 3600.0 * 24.0 * 7.0, 1),
    ("day", 3600.0 * 24.0, 1),
    ("hour", 3600.0, 0),
    ("minute", 60.0, 0),
];

fn plural(x: f64) -> &'static str {
    if x >= 2.0 {
        "s"
    } else {
        ""
    }
}

/// `seconds` of CPU time as the largest unit that fits.
pub fn render_cpu_time(seconds: f64) -> String {
    for (unit, unit_secs, precision) in TIME_UNITS {
        if seconds >= unit_secs {
            let x = seconds / unit_secs;
            return format!(
                "{} {}{}",
                format_number(round(x, precision)),
                unit,
                plural(x)
            );
        }
    }
    format!(
        "{} second{}",
        format_number(round(seconds, 0)),
        plural(seconds)
    )
}

/// Share of `value` in `total` as shown in footprint tables.
pub fn render_contribution(value: f64, total: f64) -> String {
    let pct = value / total * 100.0;
    if pct >= 0.1 {
        format!("{:.2}%", pct)
    } else {
        "< 0.1%".to_string()
    }
}

/// A user's share of the overall footprint in a monthly report, where
/// `fraction` is in `[0, 1]`.
pub fn render_report_share(fraction: f64) -> String {
    let pct = fraction * 100.0;
    if pct < 0.01 {
        "< 0.01".to_string()
    } else {
        format_number(round(pct, 2))
    }
}

/// Share of a team in the overall footprint the report was computed against;
/// `N/A` when that total is unknown.
pub fn render_team_share(team_co2e: f64, overall: Option<f64>) -> String {
    match overall {
        Some(total) if total > 0.0 => render_contribution(team_co2e, total),
        _ => "N/A".to_string(),
    }
}

pub fn ordinal_suffix(n: u32) -> &'static str {
    let i = n % 10;
    let j = n % 100;
    if i == 1 && j != 11 {
        "st"
    } else if i == 2 && j != 12 {
        "nd"
    } else if i == 3 && j != 13 {
        "rd"
    } else {
        "th"
    }
}

/// Axis labels for job counts: `0` or `1.2M`.
pub fn format_millions(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}M", format_number(round(value / 1e6, 1)))
    }
}

/// Tonnes above one tonne, kilograms below. `tonnes` is already in tonnes.
pub fn format_tonnes(tonnes: f64) -> String {
    if tonnes > 1.0 {
        format!("{} t", format_number(round(tonnes, 2)))
    } else {
        format!("{} kg", format_number(round(tonnes * 1000.0, 0)))
    }
}

/// Memory value already scaled to `unit` ("GB" or "TB").
pub fn format_memory(value: f64, unit: &str) -> String {
    if unit == "GB" {
        format!("{} GB", format_number(round(value, 1)))
    } else if value < 1.0 {
        format!("{} GB", format_number(round(value * 1024.0, 4)))
    } else {
        format!("{} TB", format_number(round(value, 3)))
    }
}

/// Upstream labels carry a few HTML entities (`&le; 1 min`).
pub fn decode_entities(s: &str) -> String {
    s.replace("&le;", "≤")
        .replace("&ge;", "≥")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&ndash;", "–")
        .replace("&amp;", "&")
}

pub fn pad2(n: i32) -> String {
    if n < 10 {
        format!("0{}", n)
    } else {
        n.to_string()
    }
}

#[cfg(feature = "web")]
fn local_parts(timestamp_ms: i64) -> Option<(i32, i32, i32, i32, i32, i32)> {
    use js_sys::Date;
    let d = Date::new(&wasm_bindgen::JsValue::from_f64(timestamp_ms as f64));
    if d.get_time().is_nan() {
        return None;
    }
    Some((
        d.get_full_year() as i32,
        (d.get_month() as i32) + 1,
        d.get_date() as i32,
        d.get_hours() as i32,
        d.get_minutes() as i32,
        d.get_day() as i32,
    ))
}

#[cfg(not(feature = "web"))]
fn local_parts(timestamp_ms: i64) -> Option<(i32, i32, i32, i32, i32, i32)> {
    use chrono::{Datelike, Timelike};
    let d = chrono::DateTime::from_timestamp_millis(timestamp_ms)?;
    Some((
        d.year(),
        d.month() as i32,
        d.day() as i32,
        d.hour() as i32,
        d.minute() as i32,
        d.weekday().num_days_from_sunday() as i32,
    ))
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// `Monday, Nov 13, 14:30` in the browser's time zone (UTC elsewhere).
pub fn format_local(timestamp_ms: i64) -> String {
    let Some((_, month, day, hour, minute, weekday)) = local_parts(timestamp_ms) else {
        return timestamp_ms.to_string();
    };
    format!(
        "{}, {} {}, {}:{}",
        WEEKDAYS[weekday.rem_euclid(7) as usize],
        MONTHS[(month - 1).rem_euclid(12) as usize],
        pad2(day),
        pad2(hour),
        pad2(minute)
    )
}

/// `Nov 13`, used for date axes.
pub fn format_day(timestamp_ms: i64) -> String {
    match local_parts(timestamp_ms) {
        Some((_, month, day, _, _, _)) => {
            format!("{} {}", MONTHS[(month - 1).rem_euclid(12) as usize], pad2(day))
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_truncates() {
        assert_eq!(round(2.99, 1), 2.9);
        assert_eq!(round(1234.56, 0), 1234.0);
        assert_eq!(round(0.3, 1), 0.3);
    }

    #[test]
    fn number_grouping() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1234567.5), "1,234,567.5");
        assert_eq!(format_number(-4200.25), "-4,200.25");
        assert_eq!(format_number(0.12345), "0.123");
    }

    #[test]
    fn cost_thresholds() {
        assert_eq!(render_cost(1234.56), "£1,234");
        assert_eq!(render_cost(42.129), "£42.12");
        assert_eq!(render_cost(1.0), "< £1");
        assert_eq!(render_cost(0.4), "< £1");
    }

    #[test]
    fn emission_units() {
        assert_eq!(render_co2e(1_500_000.0), "1,500 kg");
        assert_eq!(render_co2e(2_500.0), "2.5 kg");
        assert_eq!(render_co2e(12.34), "12.3 g");
        assert_eq!(render_co2e(0.004), "4 mg");
        assert_eq!(render_co2e(0.0), "< 1 mg");
    }

    #[test]
    fn cpu_time_units() {
        assert_eq!(render_cpu_time(30.0), "30 seconds");
        assert_eq!(render_cpu_time(1.0), "1 second");
        assert_eq!(render_cpu_time(7200.0), "2 hours");
        assert_eq!(render_cpu_time(3600.0 * 24.0 * 365.0 * 3.5), "3.5 years");
        assert_eq!(render_cpu_time(3600.0 * 24.0 * 1.5), "1.5 day");
    }

    #[test]
    fn contributions() {
        assert_eq!(render_contribution(25.0, 100.0), "25.00%");
        assert_eq!(render_contribution(0.01, 100.0), "< 0.1%");
        assert_eq!(render_contribution(0.0, 0.0), "< 0.1%");
    }

    #[test]
    fn report_shares() {
        assert_eq!(render_report_share(0.00005), "< 0.01");
        assert_eq!(render_report_share(0.125), "12.5");
        assert_eq!(render_team_share(50.0, Some(200.0)), "25.00%");
        assert_eq!(render_team_share(50.0, None), "N/A");
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(113), "th");
    }

    #[test]
    fn axis_and_tooltip_helpers() {
        assert_eq!(format_millions(0.0), "0");
        assert_eq!(format_millions(2_450_000.0), "2.4M");
        assert_eq!(format_tonnes(3.456), "3.45 t");
        assert_eq!(format_tonnes(0.5), "500 kg");
        assert_eq!(format_memory(512.25, "GB"), "512.2 GB");
        assert_eq!(format_memory(0.5, "TB"), "512 GB");
        assert_eq!(format_memory(2.5, "TB"), "2.5 TB");
    }

    #[test]
    fn entities() {
        assert_eq!(decode_entities("&le; 1 min"), "≤ 1 min");
        assert_eq!(decode_entities("&gt; 7 d"), "> 7 d");
    }

    #[test]
    fn utc_dates_without_browser() {
        // 2023-11-13 14:30 UTC, a Monday
        let ts = 1_699_885_800_000;
        assert_eq!(format_local(ts), "Monday, Nov 13, 14:30");
        assert_eq!(format_day(ts), "Nov 13");
    }
}
