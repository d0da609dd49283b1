use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::session::CourseId;
use crate::timetable::DayEntry;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read store document: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse store document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only view of the flat-file appointment documents the scraper job
/// maintains, one JSON file per course under `<dir>/timetables/`.
pub struct AppointmentStore {
    dir: PathBuf,
}

impl AppointmentStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: data_dir.into(),
        }
    }

    pub fn course_path(&self, course: &CourseId) -> PathBuf {
        self.dir.join("timetables").join(format!("{course}.json"))
    }

    /// Loads every scraped day for the given course. A missing or unreadable
    /// document is an error here; the controller maps it to "no data".
    pub fn load_course(&self, course: &CourseId) -> Result<Vec<DayEntry>, StoreError> {
        let path = self.course_path(course);
        tracing::debug!(path = %path.display(), "loading timetable document");
        load_days(&path)
    }
}

fn load_days(path: &Path) -> Result<Vec<DayEntry>, StoreError> {
    let content = std::fs::read_to_string(path)?;
    let days = serde_json::from_str(&content)?;
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const SAMPLE_DOCUMENT: &str = r#"[
        {
            "date": "23.10.2023",
            "appointments": [
                { "name": "Single", "location": "A1", "startTime": "08.00", "endTime": "09.30" }
            ]
        },
        {
            "date": "24.10.2023",
            "appointments": [
                { "name": "Double1", "location": "B1", "startTime": "10.00", "endTime": "11.30" },
                { "name": "Double2", "location": "B2", "startTime": "11.00", "endTime": "12.30" }
            ]
        }
    ]"#;

    fn course() -> CourseId {
        CourseId::new("FN", "TIT24")
    }

    fn store_with_sample() -> (TempDir, AppointmentStore) {
        let dir = TempDir::new().unwrap();
        let timetables = dir.path().join("timetables");
        std::fs::create_dir_all(&timetables).unwrap();
        std::fs::write(timetables.join("FN-TIT24.json"), SAMPLE_DOCUMENT).unwrap();
        let store = AppointmentStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn loads_course_document() {
        let (_dir, store) = store_with_sample();

        let days = store.load_course(&course()).unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2023, 10, 23).unwrap());
        assert_eq!(days[1].appointments.len(), 2);
    }

    #[test]
    fn course_path_is_keyed_by_course_identifier() {
        let store = AppointmentStore::new("data");
        let path = store.course_path(&course());
        assert_eq!(path, PathBuf::from("data/timetables/FN-TIT24.json"));
    }

    #[test]
    fn missing_document_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let store = AppointmentStore::new(dir.path());

        let result = store.load_course(&course());

        assert!(matches!(result, Err(StoreError::Io(_))));
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let timetables = dir.path().join("timetables");
        std::fs::create_dir_all(&timetables).unwrap();
        std::fs::write(timetables.join("FN-TIT24.json"), "not json").unwrap();
        let store = AppointmentStore::new(dir.path());

        let result = store.load_course(&course());

        assert!(matches!(result, Err(StoreError::Parse(_))));
    }
}
