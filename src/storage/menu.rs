use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::store::StoreError;

/// One day of the cafeteria menu document (`mensa_<FACULTY>.json`).
///
/// The scraper labels days like `Mo. 23.10.` without a year; the reader
/// supplies the year when matching against a concrete date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuDay {
    #[serde(rename = "datum")]
    pub date_label: String,
    #[serde(rename = "gerichte")]
    pub dishes: Vec<Dish>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    #[serde(rename = "kategorie")]
    pub category: String,
    pub name: String,
    #[serde(rename = "preise", default)]
    pub prices: Option<String>,
    #[serde(rename = "allergene", default)]
    pub allergens: Vec<String>,
}

pub struct MenuStore {
    dir: PathBuf,
}

impl MenuStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: data_dir.into(),
        }
    }

    pub fn load_for_faculty(&self, faculty: &str) -> Result<Vec<MenuDay>, StoreError> {
        let path = self.dir.join(format!("mensa_{faculty}.json"));
        tracing::debug!(path = %path.display(), "loading menu document");
        let content = std::fs::read_to_string(path)?;
        let days = serde_json::from_str(&content)?;
        Ok(days)
    }
}

/// Finds the menu day whose scraped label names the given date. The label's
/// missing year is taken from the target date.
pub fn find_menu_day(days: &[MenuDay], date: NaiveDate) -> Option<&MenuDay> {
    days.iter()
        .find(|day| date_from_label(&day.date_label, date.year()) == Some(date))
}

fn date_from_label(label: &str, year: i32) -> Option<NaiveDate> {
    let token = label
        .split_whitespace()
        .find(|t| t.starts_with(|c: char| c.is_ascii_digit()))?;
    let mut parts = token.split('.');
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
