//! Render calamine cell values as display text
//!
//! Floats use the shortest round-trip form, switching to exponent notation
//! below 1e-4 and from 1e16 (`1e-07`, `1e+21`). Booleans print `True` and
//! `False`, time-only values `08:30:00`, durations `1 day, 2:00:00`.

use calamine::{Data, ExcelDateTime};
use chrono::{NaiveDateTime, NaiveTime, Timelike};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const TIME_FORMAT: &str = "%H:%M:%S";
const MICROS_PER_DAY: i64 = 86_400_000_000;

/// Text for a literal cell value, or None when the cell is empty
///
/// An empty string is still a value and renders as "".
pub fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => float_text(*f),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        Data::DateTime(dt) => datetime_text(dt),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    };

    Some(text)
}

/// Formula text with the leading '=' calamine strips, or None when blank
pub fn formula_text(formula: &str) -> Option<String> {
    if formula.trim().is_empty() {
        None
    } else if formula.starts_with('=') {
        Some(formula.to_string())
    } else {
        Some(format!("={}", formula))
    }
}

fn float_text(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        // Rust prints "1e-7" / "1.5e21"; exponents get a sign and two digits
        let sci = format!("{:e}", value);
        if let Some((mantissa, exponent)) = sci.split_once('e') {
            if let Ok(exp) = exponent.parse::<i32>() {
                let sign = if exp < 0 { '-' } else { '+' };
                return format!("{}e{}{:02}", mantissa, sign, exp.abs());
            }
        }
        return sci;
    }

    value.to_string()
}

fn datetime_text(dt: &ExcelDateTime) -> String {
    let serial = dt.as_f64();

    if dt.is_duration() {
        return duration_text(serial);
    }
    // A serial below one day carries no date part
    if (0.0..1.0).contains(&serial) {
        return time_text(serial);
    }

    match dt.as_datetime() {
        Some(ndt) => format_datetime(&ndt),
        None => float_text(serial),
    }
}

fn to_micros(serial: f64) -> i64 {
    (serial * MICROS_PER_DAY as f64).round() as i64
}

fn with_micros(text: String, micros: u32) -> String {
    if micros == 0 {
        text
    } else {
        format!("{}.{:06}", text, micros)
    }
}

fn format_datetime(ndt: &NaiveDateTime) -> String {
    with_micros(
        ndt.format(DATETIME_FORMAT).to_string(),
        ndt.nanosecond() / 1_000,
    )
}

fn time_text(serial: f64) -> String {
    let micros = to_micros(serial).clamp(0, MICROS_PER_DAY - 1);
    let secs = (micros / 1_000_000) as u32;
    let frac = (micros % 1_000_000) as u32;

    match NaiveTime::from_num_seconds_from_midnight_opt(secs, frac * 1_000) {
        Some(time) => with_micros(time.format(TIME_FORMAT).to_string(), frac),
        None => float_text(serial),
    }
}

/// "2:00:00", "1 day, 2:00:00", "-1 day, 23:00:00"
fn duration_text(serial: f64) -> String {
    let micros = to_micros(serial);
    let days = micros.div_euclid(MICROS_PER_DAY);
    let rest = micros.rem_euclid(MICROS_PER_DAY);

    let secs = rest / 1_000_000;
    let clock = with_micros(
        format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60),
        (rest % 1_000_000) as u32,
    );

    match days {
        0 => clock,
        1 | -1 => format!("{} day, {}", days, clock),
        _ => format!("{} days, {}", days, clock),
    }
}
