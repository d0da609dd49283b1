use chrono::NaiveDate;

use super::appointment::{Appointment, DayEntry, format_wire_time};
use super::grid::{GridConfig, WEEKDAYS, WeekdayKey};

/// Horizontal render mode, derived from the appointment's overlap degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Single,
    Double,
    Triple,
}

const DOUBLE_OFFSETS: [u8; 2] = [3, 52];
const TRIPLE_OFFSETS: [u8; 3] = [3, 35, 67];

impl DisplayMode {
    /// Degree 1 renders full width, 2 in two lanes, 3 or more in three.
    /// There is no 4+-column mode; the resolver drops what cannot fit.
    fn from_degree(degree: u32) -> Self {
        match degree {
            0 | 1 => DisplayMode::Single,
            2 => DisplayMode::Double,
            _ => DisplayMode::Triple,
        }
    }

    pub fn columns(self) -> u8 {
        match self {
            DisplayMode::Single => 1,
            DisplayMode::Double => 2,
            DisplayMode::Triple => 3,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            DisplayMode::Single => "single-app",
            DisplayMode::Double => "double-app",
            DisplayMode::Triple => "triple-app",
        }
    }

    /// Left offset of the given lane, in percent of the day column width.
    pub fn left_pct(self, column: u8) -> u8 {
        match self {
            DisplayMode::Single => 0,
            DisplayMode::Double => DOUBLE_OFFSETS[column as usize],
            DisplayMode::Triple => TRIPLE_OFFSETS[column as usize],
        }
    }
}

/// One appointment placed into the grid: purely visual data, recomputed on
/// every render and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    pub name: String,
    pub location: Option<String>,
    pub start: u32,
    pub end: u32,
    /// Slot label of the starting row, `HH.MM`.
    pub start_label: String,
    pub row: usize,
    pub height_units: u32,
    pub mode: DisplayMode,
    pub column: u8,
    pub left_pct: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub key: WeekdayKey,
    pub date: NaiveDate,
    pub blocks: Vec<PlacedBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    pub week_start: NaiveDate,
    pub days: Vec<DayColumn>,
}

/// Lays out one week of appointments. A date with no entry in `all_days`
/// yields an empty day column, not an error.
pub fn compute_week_layout(
    day_dates: &[NaiveDate; 5],
    all_days: &[DayEntry],
    config: &GridConfig,
) -> WeekLayout {
    let days = WEEKDAYS
        .iter()
        .zip(day_dates)
        .map(|(&key, &date)| {
            let blocks = all_days
                .iter()
                .find(|entry| entry.date == date)
                .map(|entry| compute_day_layout(&entry.appointments, config))
                .unwrap_or_default();
            DayColumn { key, date, blocks }
        })
        .collect();

    WeekLayout {
        week_start: day_dates[0],
        days,
    }
}

/// Places a single day's appointments, resolving overlaps into columns.
///
/// Appointments are processed in input order; that order is the tie-break
/// when two appointments start at the identical minute, which keeps the
/// layout deterministic.
pub fn compute_day_layout(appointments: &[Appointment], config: &GridConfig) -> Vec<PlacedBlock> {
    let mut blocks: Vec<PlacedBlock> = Vec::new();

    for (index, appointment) in appointments.iter().enumerate() {
        let Some((row, height_units)) = visible_rows(appointment, config) else {
            continue;
        };

        let degree = overlap_degree(appointments, index, config.step_minutes);
        let mode = DisplayMode::from_degree(degree);

        let Some(column) = assign_column(&blocks, appointment, mode) else {
            tracing::warn!(
                name = %appointment.name,
                start = %format_wire_time(appointment.start),
                "no free display column, dropping appointment"
            );
            continue;
        };

        blocks.push(PlacedBlock {
            name: appointment.name.clone(),
            location: appointment.location.clone(),
            start: appointment.start,
            end: appointment.end,
            start_label: format_wire_time(config.slot_start_minutes(row)),
            row,
            height_units,
            mode,
            column,
            left_pct: mode.left_pct(column),
        });
    }

    blocks
}

/// The rows whose slot start lies within the appointment's time range,
/// clipped to the grid window. None when the appointment is entirely
/// outside the grid.
fn visible_rows(appointment: &Appointment, config: &GridConfig) -> Option<(usize, u32)> {
    let mut first_row = None;
    let mut count = 0u32;

    for row in 0..config.slot_count() as usize {
        let slot_start = config.slot_start_minutes(row);
        if slot_start >= appointment.start && slot_start < appointment.end {
            first_row.get_or_insert(row);
            count += 1;
        }
    }

    first_row.map(|row| (row, count))
}

/// Maximum number of concurrently active appointments at any instant within
/// the target's range, including the target itself.
///
/// Counts occupancy per step-sized sub-slot of the target so that two
/// neighbours which overlap the target at disjoint instants do not add up
/// to a higher degree than ever actually occurs.
fn overlap_degree(appointments: &[Appointment], target_index: usize, step_minutes: u32) -> u32 {
    let target = &appointments[target_index];
    let sub_slots = (target.duration_minutes() / step_minutes).max(1) as usize;
    let mut occupancy = vec![0u32; sub_slots];

    for (index, other) in appointments.iter().enumerate() {
        if index == target_index || !target.overlaps(other) {
            continue;
        }
        let from = target.start.max(other.start);
        let to = target.end.min(other.end);
        let mut minute = from;
        while minute < to {
            let slot = ((minute - target.start) / step_minutes) as usize;
            if let Some(count) = occupancy.get_mut(slot) {
                *count += 1;
            }
            minute += step_minutes;
        }
    }

    1 + occupancy.iter().copied().max().unwrap_or(0)
}

/// Lowest-indexed lane not occupied by an earlier-placed appointment that is
/// still running at the target's start. None when every lane of the target's
/// display mode is taken.
fn assign_column(placed: &[PlacedBlock], target: &Appointment, mode: DisplayMode) -> Option<u8> {
    let mut occupied = [false; 3];
    for block in placed {
        if block.start <= target.start && block.end > target.start {
            occupied[block.column as usize] = true;
        }
    }

    (0..mode.columns()).find(|&column| !occupied[column as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::appointment::parse_wire_time;
    use pretty_assertions::assert_eq;

    fn appointment(name: &str, start: &str, end: &str) -> Appointment {
        Appointment {
            name: name.to_string(),
            location: Some(format!("{name} room")),
            start: parse_wire_time(start).unwrap(),
            end: parse_wire_time(end).unwrap(),
        }
    }

    fn layout(appointments: &[Appointment]) -> Vec<PlacedBlock> {
        compute_day_layout(appointments, &GridConfig::default())
    }

    #[test]
    fn single_appointment_renders_full_width() {
        let blocks = layout(&[appointment("Single", "08.00", "09.30")]);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].mode, DisplayMode::Single);
        assert_eq!(blocks[0].left_pct, 0);
        assert_eq!(blocks[0].row, 0);
        assert_eq!(blocks[0].height_units, 6);
        assert_eq!(blocks[0].start_label, "08.00");
    }

    #[test]
    fn two_overlapping_appointments_render_double_column() {
        let blocks = layout(&[
            appointment("Double1", "10.00", "11.30"),
            appointment("Double2", "11.00", "12.30"),
        ]);

        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| b.mode == DisplayMode::Double));
        assert_eq!(blocks[0].left_pct, 3);
        assert_eq!(blocks[1].left_pct, 52);
    }

    #[test]
    fn three_overlapping_appointments_render_triple_column() {
        let blocks = layout(&[
            appointment("Triple1", "13.00", "14.30"),
            appointment("Triple2", "13.00", "15.00"),
            appointment("Triple3", "14.00", "16.00"),
        ]);

        assert_eq!(blocks.len(), 3);
        assert!(blocks.iter().all(|b| b.mode == DisplayMode::Triple));
        assert_eq!(blocks[0].left_pct, 3);
        assert_eq!(blocks[1].left_pct, 35);
        assert_eq!(blocks[2].left_pct, 67);
    }

    #[test]
    fn identical_start_times_resolve_by_input_order() {
        let blocks = layout(&[
            appointment("First", "10.00", "11.00"),
            appointment("Second", "10.00", "11.00"),
        ]);

        assert_eq!(blocks[0].name, "First");
        assert_eq!(blocks[0].column, 0);
        assert_eq!(blocks[1].name, "Second");
        assert_eq!(blocks[1].column, 1);
    }

    #[test]
    fn fourth_simultaneous_appointment_is_dropped() {
        let blocks = layout(&[
            appointment("A", "10.00", "12.00"),
            appointment("B", "10.00", "12.00"),
            appointment("C", "10.00", "12.00"),
            appointment("D", "10.00", "12.00"),
        ]);

        assert_eq!(blocks.len(), 3);
        assert!(blocks.iter().all(|b| b.name != "D"));
    }

    #[test]
    fn column_frees_up_after_appointment_ends() {
        let blocks = layout(&[
            appointment("Morning", "08.00", "09.00"),
            appointment("Late", "09.00", "10.30"),
            appointment("Overlap", "10.00", "11.00"),
        ]);

        // Morning has ended by 09.00, so Late and Overlap form the only
        // overlapping pair and Overlap takes the second lane.
        assert_eq!(blocks[0].mode, DisplayMode::Single);
        assert_eq!(blocks[1].mode, DisplayMode::Double);
        assert_eq!(blocks[1].column, 0);
        assert_eq!(blocks[2].column, 1);
    }

    #[test]
    fn disjoint_overlaps_do_not_inflate_degree() {
        // B and C both overlap A, but never each other: the grid is never
        // more than two deep, so everything stays double-column.
        let blocks = layout(&[
            appointment("A", "08.00", "12.00"),
            appointment("B", "08.00", "09.00"),
            appointment("C", "11.00", "12.00"),
        ]);

        assert_eq!(blocks.len(), 3);
        assert!(blocks.iter().all(|b| b.mode == DisplayMode::Double));
    }

    #[test]
    fn appointment_outside_grid_window_is_skipped() {
        let blocks = layout(&[appointment("Early", "06.00", "07.30")]);
        assert!(blocks.is_empty());
    }

    #[test]
    fn appointment_is_clipped_to_grid_window() {
        let blocks = layout(&[appointment("Evening", "18.00", "20.00")]);

        assert_eq!(blocks.len(), 1);
        // 18.00 .. 18.45 inclusive
        assert_eq!(blocks[0].height_units, 4);
    }

    #[test]
    fn day_layout_is_deterministic() {
        let appointments = [
            appointment("Triple1", "13.00", "14.30"),
            appointment("Triple2", "13.00", "15.00"),
            appointment("Triple3", "14.00", "16.00"),
        ];

        assert_eq!(layout(&appointments), layout(&appointments));
    }

    #[test]
    fn week_layout_leaves_missing_days_empty() {
        let monday = NaiveDate::from_ymd_opt(2023, 10, 23).unwrap();
        let dates = std::array::from_fn(|offset| {
            monday
                .checked_add_days(chrono::Days::new(offset as u64))
                .unwrap()
        });
        let all_days = vec![DayEntry {
            date: NaiveDate::from_ymd_opt(2023, 10, 24).unwrap(),
            appointments: vec![appointment("Single", "08.00", "09.30")],
        }];

        let layout = compute_week_layout(&dates, &all_days, &GridConfig::default());

        assert_eq!(layout.week_start, monday);
        assert_eq!(layout.days.len(), 5);
        assert!(layout.days[0].blocks.is_empty());
        assert_eq!(layout.days[1].blocks.len(), 1);
        assert_eq!(layout.days[1].key, WeekdayKey::Tue);
        assert!(layout.days[2].blocks.is_empty());
    }
}
