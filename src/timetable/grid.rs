use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::appointment::format_wire_time;

/// Day-column address inside the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekdayKey {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

pub const WEEKDAYS: [WeekdayKey; 5] = [
    WeekdayKey::Mon,
    WeekdayKey::Tue,
    WeekdayKey::Wed,
    WeekdayKey::Thu,
    WeekdayKey::Fri,
];

impl WeekdayKey {
    pub fn key(self) -> &'static str {
        match self {
            WeekdayKey::Mon => "mon",
            WeekdayKey::Tue => "tue",
            WeekdayKey::Wed => "wed",
            WeekdayKey::Thu => "thu",
            WeekdayKey::Fri => "fri",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeekdayKey::Mon => "Monday",
            WeekdayKey::Tue => "Tuesday",
            WeekdayKey::Wed => "Wednesday",
            WeekdayKey::Thu => "Thursday",
            WeekdayKey::Fri => "Friday",
        }
    }

    /// Offset in days from the week's Monday.
    pub fn offset(self) -> u64 {
        match self {
            WeekdayKey::Mon => 0,
            WeekdayKey::Tue => 1,
            WeekdayKey::Wed => 2,
            WeekdayKey::Thu => 3,
            WeekdayKey::Fri => 4,
        }
    }
}

/// Grid geometry. End hour is exclusive: under defaults the last slot
/// starts at 18.45 and 19.00 is not a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub start_hour: u32,
    pub end_hour: u32,
    pub step_minutes: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 19,
            step_minutes: 15,
        }
    }
}

impl GridConfig {
    pub fn slots_per_hour(&self) -> u32 {
        60 / self.step_minutes
    }

    pub fn slot_count(&self) -> u32 {
        (self.end_hour - self.start_hour) * self.slots_per_hour()
    }

    /// Minutes since midnight at which the slot with the given row index starts.
    pub fn slot_start_minutes(&self, row: usize) -> u32 {
        self.start_hour * 60 + row as u32 * self.step_minutes
    }

    /// Row index of the slot covering the given minute, if it falls inside
    /// the grid's time window.
    pub fn slot_index(&self, minutes: u32) -> Option<usize> {
        let start = self.start_hour * 60;
        let end = self.end_hour * 60;
        if minutes < start || minutes >= end {
            return None;
        }
        Some(((minutes - start) / self.step_minutes) as usize)
    }

    /// All slot labels in `HH.MM` wire format, matching appointment times
    /// exactly so slot lookup needs no parsing.
    pub fn slot_labels(&self) -> Vec<String> {
        (0..self.slot_count())
            .map(|row| format_wire_time(self.slot_start_minutes(row as usize)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayHeader {
    pub key: WeekdayKey,
    pub date: NaiveDate,
    /// `day.month.` header label, unpadded, e.g. `23.10.`
    pub date_label: String,
}

/// One grid row: the slot label plus an hour label on the first row of
/// every full hour (that cell spans the hour's rows visually).
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub time_label: String,
    pub hour_label: Option<String>,
}

/// The empty weekly grid. Rebuilt from scratch on every week change so no
/// slot content from a previous week can leak through.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSkeleton {
    pub monday: NaiveDate,
    pub headers: Vec<DayHeader>,
    pub rows: Vec<GridRow>,
}

impl GridSkeleton {
    pub fn build(monday: NaiveDate, config: &GridConfig) -> Self {
        let headers = WEEKDAYS
            .iter()
            .map(|&key| {
                let date = monday
                    .checked_add_days(chrono::Days::new(key.offset()))
                    .unwrap_or(monday);
                DayHeader {
                    key,
                    date,
                    date_label: format!("{}.{}.", date.day(), date.month()),
                }
            })
            .collect();

        let slots_per_hour = config.slots_per_hour();
        let rows = (0..config.slot_count())
            .map(|row| {
                let minutes = config.slot_start_minutes(row as usize);
                let hour_label = (row % slots_per_hour == 0).then(|| {
                    let hour = minutes / 60;
                    format!("{:02}:00 - {:02}:00", hour, hour + 1)
                });
                GridRow {
                    time_label: format_wire_time(minutes),
                    hour_label,
                }
            })
            .collect();

        Self {
            monday,
            headers,
            rows,
        }
    }
}
