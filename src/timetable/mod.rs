pub mod appointment;
pub mod grid;
pub mod layout;
pub mod week;

pub use appointment::{Appointment, DayEntry, TimeParseError, parse_wire_time};
pub use grid::{GridConfig, GridSkeleton, WeekdayKey};
pub use layout::{DayColumn, DisplayMode, PlacedBlock, WeekLayout, compute_week_layout};
pub use week::{WeekWindow, current_monday};
