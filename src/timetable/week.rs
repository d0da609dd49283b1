use chrono::{Datelike, NaiveDate};

/// Returns the Monday of the week containing `today` (ISO week start).
pub fn current_monday(today: NaiveDate) -> NaiveDate {
    let days_from_monday = today.weekday().num_days_from_monday() as u64;
    today
        .checked_sub_days(chrono::Days::new(days_from_monday))
        .unwrap_or(today)
}

/// The paging window over displayable weeks.
///
/// `home_monday` anchors the backward clamp: the window never retreats past
/// the Monday of the real current calendar week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekWindow {
    home_monday: NaiveDate,
    pub selected_monday: NaiveDate,
    pub previous_monday: NaiveDate,
    pub next_monday: NaiveDate,
}

impl WeekWindow {
    pub fn new(today: NaiveDate) -> Self {
        let home = current_monday(today);
        Self {
            home_monday: home,
            selected_monday: home,
            previous_monday: home,
            next_monday: add_days(home, 7),
        }
    }

    /// Shifts the window one week forward. No upper bound.
    pub fn advance(&mut self) {
        self.selected_monday = self.next_monday;
        self.recompute_neighbours();
    }

    /// Shifts the window one week back, clamped at the current week.
    /// Returns false when the retreat was a no-op.
    pub fn retreat(&mut self) -> bool {
        let candidate = sub_days(self.selected_monday, 7);
        if candidate < self.home_monday {
            return false;
        }
        self.selected_monday = candidate;
        self.recompute_neighbours();
        true
    }

    /// The five weekday dates (Mon..Fri) of the selected week.
    pub fn day_dates(&self) -> [NaiveDate; 5] {
        std::array::from_fn(|offset| add_days(self.selected_monday, offset as u64))
    }

    fn recompute_neighbours(&mut self) {
        self.next_monday = add_days(self.selected_monday, 7);
        self.previous_monday = sub_days(self.selected_monday, 7).max(self.home_monday);
    }
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(chrono::Days::new(days)).unwrap_or(date)
}

fn sub_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(chrono::Days::new(days)).unwrap_or(date)
}
