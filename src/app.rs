use chrono::NaiveDate;

use crate::render;
use crate::timetable::{DayEntry, GridConfig, WeekWindow, compute_week_layout};

/// Owns the week selection and the cached store data for the current course.
///
/// Data fetches are tagged with a monotonically increasing token; a slow
/// response from a superseded fetch can no longer overwrite the result of a
/// later one.
pub struct DashboardController {
    window: WeekWindow,
    grid: GridConfig,
    days: Vec<DayEntry>,
    has_data: bool,
    issued_token: u64,
    applied_token: u64,
}

impl DashboardController {
    pub fn new(today: NaiveDate, grid: GridConfig) -> Self {
        Self {
            window: WeekWindow::new(today),
            grid,
            days: Vec::new(),
            has_data: false,
            issued_token: 0,
            applied_token: 0,
        }
    }

    pub fn window(&self) -> &WeekWindow {
        &self.window
    }

    /// Pages one week forward. The caller follows up with a fetch and a
    /// re-render; the token guard keeps overlapping refreshes consistent.
    pub fn show_next_week(&mut self) {
        self.window.advance();
    }

    /// Pages one week back, clamped at the current calendar week.
    /// Returns false when the clamp made this a no-op.
    pub fn show_previous_week(&mut self) -> bool {
        self.window.retreat()
    }

    /// Starts a fetch and returns its token.
    pub fn begin_fetch(&mut self) -> u64 {
        self.issued_token += 1;
        self.issued_token
    }

    /// Applies a completed fetch. `None` means the fetch failed or the
    /// course is unknown; both render as "no data". Returns false when the
    /// response was stale and has been discarded.
    pub fn complete_fetch(&mut self, token: u64, days: Option<Vec<DayEntry>>) -> bool {
        if token != self.issued_token || token <= self.applied_token {
            tracing::debug!(token, latest = self.issued_token, "discarding stale fetch");
            return false;
        }
        self.applied_token = token;
        match days {
            Some(days) => {
                self.days = days;
                self.has_data = true;
            }
            None => {
                self.days.clear();
                self.has_data = false;
            }
        }
        true
    }

    /// Renders the selected week from the cached data. Pure with respect to
    /// the controller state: repeated calls yield identical markup.
    pub fn render(&self) -> String {
        if !self.has_data {
            return render::render_placeholder();
        }
        let layout = compute_week_layout(&self.window.day_dates(), &self.days, &self.grid);
        render::render_week(&layout, &self.grid)
    }
}
