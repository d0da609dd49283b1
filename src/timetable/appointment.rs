use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TimeParseError {
    #[error("Invalid time '{0}': expected HH.MM")]
    Malformed(String),
    #[error("Time '{0}' out of range")]
    OutOfRange(String),
}

/// Parses the store's `HH.MM` wall-clock format into minutes since midnight.
///
/// The period-delimited format is the wire format of the appointment
/// documents; internally all layout math works on minutes.
pub fn parse_wire_time(s: &str) -> Result<u32, TimeParseError> {
    let (hours, minutes) = s
        .split_once('.')
        .ok_or_else(|| TimeParseError::Malformed(s.to_string()))?;
    let hours: u32 = hours
        .parse()
        .map_err(|_| TimeParseError::Malformed(s.to_string()))?;
    let minutes: u32 = minutes
        .parse()
        .map_err(|_| TimeParseError::Malformed(s.to_string()))?;
    if hours >= 24 || minutes >= 60 {
        return Err(TimeParseError::OutOfRange(s.to_string()));
    }
    Ok(hours * 60 + minutes)
}

pub fn format_wire_time(minutes: u32) -> String {
    format!("{:02}.{:02}", minutes / 60, minutes % 60)
}

mod wire_time {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(minutes: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_wire_time(*minutes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_wire_time(&s).map_err(de::Error::custom)
    }
}

mod wire_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    const FORMAT: &str = "%d.%m.%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(s.trim(), FORMAT).map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "startTime", with = "wire_time")]
    pub start: u32,
    #[serde(rename = "endTime", with = "wire_time")]
    pub end: u32,
}

/// One calendar day of the store document. Replaced wholesale on every
/// scrape; the renderer never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEntry {
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
    pub appointments: Vec<Appointment>,
}

impl Appointment {
    pub fn duration_minutes(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Half-open interval overlap: appointments that merely touch do not overlap.
    pub fn overlaps(&self, other: &Appointment) -> bool {
        self.start < other.end && other.start < self.end
    }
}
