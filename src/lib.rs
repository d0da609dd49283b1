pub mod app;
pub mod render;
pub mod session;
pub mod storage;
pub mod timetable;

pub use app::DashboardController;
pub use session::{CourseId, SessionInfo};
pub use timetable::{Appointment, DayEntry, GridConfig, WeekLayout, WeekWindow};
