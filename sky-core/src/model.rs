use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A query location. Values are passed through to the remote service as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Path segment sent to the remote service, e.g. `37.7749, -122.4194`.
    ///
    /// Whole numbers keep their fractional part (`37.0`, not `37`). Magnitudes
    /// below 1e-4 or from 1e16 up use a signed two-digit exponent (`1e-05`, `1e+16`).
    pub fn path_segment(&self) -> String {
        format!("{}, {}", format_degrees(self.latitude), format_degrees(self.longitude))
    }
}

/// Shortest round-trip rendering of `value` in the remote service's number format.
fn format_degrees(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }

    // `{:?}` already picks the shortest digits and switches to exponent form at
    // the same thresholds; only the exponent spelling differs.
    let debug = format!("{value:?}");
    let Some((mantissa, exponent)) = debug.split_once('e') else {
        return debug;
    };

    match exponent.parse::<i32>() {
        Ok(exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        Err(_) => debug,
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path_segment())
    }
}

/// Forecast payload as returned by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub currently: CurrentConditions,
    pub daily: DailyForecast,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    #[serde(with = "epoch_seconds")]
    pub time: DateTime<Utc>,
    pub summary: String,
    pub icon: String,
    /// Degrees Fahrenheit.
    pub temperature: f64,
    /// Relative humidity, 0.0 ..= 1.0.
    pub humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub data: Vec<DayConditions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayConditions {
    #[serde(with = "epoch_seconds")]
    pub time: DateTime<Utc>,
    pub icon: String,
    pub temperature_low: f64,
    pub temperature_high: f64,
    pub humidity: f64,
}

/// Timestamps encoded as a JSON number of seconds since the Unix epoch.
/// Both integers and floats are accepted; ISO-8601 strings are rejected.
pub mod epoch_seconds {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seconds {
        Int(i64),
        Float(f64),
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.timestamp())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let parsed = match Seconds::deserialize(deserializer)? {
            Seconds::Int(secs) => DateTime::from_timestamp(secs, 0),
            Seconds::Float(secs) if secs.is_finite() => {
                let whole = secs.floor();
                let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
                if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
                    None
                } else {
                    DateTime::from_timestamp(whole as i64, nanos)
                }
            }
            Seconds::Float(_) => None,
        };

        parsed.ok_or_else(|| D::Error::custom("timestamp out of range"))
    }
}
