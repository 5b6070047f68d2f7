//! Weather report formatting.
//!
//! Turns a [`WeatherSnapshot`] into a titled, fielded [`WeatherReport`]. The
//! chat adapter renders it as an embed; nothing here knows about Discord.

use chrono::{DateTime, Utc};

use crate::types::WeatherSnapshot;

/// Embed accent colour (dodger blue).
pub const REPORT_COLOUR: u32 = 0x1e90ff;

pub const REPORT_FOOTER: &str = "Data provided by OpenWeatherMap";

/// Period label used for on-demand reports.
pub const PERIOD_CURRENT: &str = "current";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A formatted weather message, ready for any chat surface.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub title: String,
    pub fields: Vec<ReportField>,
    pub colour: u32,
    pub footer: String,
    pub timestamp: DateTime<Utc>,
}

fn field(name: &str, value: String) -> ReportField {
    ReportField {
        name: name.to_string(),
        value,
        inline: true,
    }
}

/// Build the report for `snapshot` at `location_label`, titled with `period_label`.
pub fn format_report(
    snapshot: &WeatherSnapshot,
    location_label: &str,
    period_label: &str,
    now: DateTime<Utc>,
) -> WeatherReport {
    let rain = if snapshot.has_recent_rain { "yes" } else { "no" };

    WeatherReport {
        title: format!("\u{2600}\u{fe0f} {location_label} weather ({period_label})"),
        fields: vec![
            field("Conditions", snapshot.condition.clone()),
            field("Temperature", format!("{}\u{2103}", snapshot.temperature_celsius)),
            field("Wind", format!("{} m/s", snapshot.wind_speed_mps)),
            field("Rain (last 1h)", rain.to_string()),
        ],
        colour: REPORT_COLOUR,
        footer: REPORT_FOOTER.to_string(),
        timestamp: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn snapshot(has_recent_rain: bool) -> WeatherSnapshot {
        WeatherSnapshot {
            condition: "clear sky".to_string(),
            temperature_celsius: 21.5,
            wind_speed_mps: 3.2,
            has_recent_rain,
        }
    }

    #[test]
    fn report_has_title_and_four_fields() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
        let report = format_report(&snapshot(false), "Shinagawa, JP", "08:00", now);

        assert!(report.title.contains("Shinagawa, JP"));
        assert!(report.title.contains("08:00"));
        assert_eq!(report.fields.len(), 4);
        assert_eq!(report.fields[0].value, "clear sky");
        assert_eq!(report.fields[1].value, "21.5\u{2103}");
        assert_eq!(report.fields[2].value, "3.2 m/s");
        assert_eq!(report.fields[3].value, "no");
        assert!(report.fields.iter().all(|f| f.inline));
        assert_eq!(report.colour, REPORT_COLOUR);
        assert_eq!(report.footer, REPORT_FOOTER);
        assert_eq!(report.timestamp, now);
    }

    #[test]
    fn rain_flag_renders_yes() {
        let report = format_report(&snapshot(true), "X", PERIOD_CURRENT, Utc::now());
        assert_eq!(report.fields[3].value, "yes");
        assert!(report.title.contains("current"));
    }
}
