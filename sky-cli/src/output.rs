use chrono::{DateTime, TimeZone};
use sky_core::{Preferences, Section, WeatherRecord};
use std::fmt::Display;

/// Human-readable report for a fetched record, rendered in `tz`.
pub fn render_record<Tz>(record: &WeatherRecord, prefs: &Preferences, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let date = |at: &DateTime<chrono::Utc>| prefs.date_mode.format(&at.with_timezone(tz));
    let temp = |f: f64| prefs.temperature_mode.format(f);

    let now = &record.currently;
    let mut out = format!(
        "Weather at {:?}, {:?}\n\
         Currently ({} {}): {}, {}, humidity {:.0}%\n",
        record.latitude,
        record.longitude,
        date(&now.time),
        now.time.with_timezone(tz).format("%H:%M"),
        now.summary,
        temp(now.temperature),
        now.humidity * 100.0,
    );

    if !record.daily.data.is_empty() {
        out.push_str("Daily forecast:\n");
    }
    for day in &record.daily.data {
        out.push_str(&format!(
            "  {:<18} {:>8} .. {:<8} {:<20} humidity {:.0}%\n",
            date(&day.time),
            temp(day.temperature_low),
            temp(day.temperature_high),
            day.icon,
            day.humidity * 100.0,
        ));
    }

    out
}

/// Settings sections with a check mark on the active row.
pub fn render_settings(prefs: &Preferences) -> String {
    let mut out = String::new();
    for section in Section::all() {
        out.push_str(section.name());
        out.push('\n');
        for row in section.rows(prefs) {
            let mark = if row.checked { '✓' } else { ' ' };
            out.push_str(&format!("  [{mark}] {}\n", row.label));
        }
    }
    out
}
