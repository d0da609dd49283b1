use std::{env, path::PathBuf};

use chrono::{Local, NaiveDate};

use uniplan::render::render_menu;
use uniplan::session::{CourseId, SessionClient};
use uniplan::storage::config::Config;
use uniplan::storage::menu::{MenuStore, find_menu_day};
use uniplan::storage::store::AppointmentStore;
use uniplan::timetable::week::current_monday;
use uniplan::DashboardController;

pub struct CliOptions {
    pub week: Option<NaiveDate>,
    pub course: Option<CourseId>,
    pub out: Option<PathBuf>,
    pub menu: bool,
}

pub fn parse_cli_options() -> Result<CliOptions, String> {
    let mut options = CliOptions {
        week: None,
        course: None,
        out: None,
        menu: false,
    };
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--week" => {
                let date_str = args
                    .next()
                    .ok_or_else(|| "--week requires a date".to_string())?;
                let date = NaiveDate::parse_from_str(&date_str, "%Y/%m/%d")
                    .map_err(|_| format!("Invalid date '{}'. Use YYYY/MM/DD.", date_str))?;
                options.week = Some(date);
            }
            "--course" => {
                let course_str = args
                    .next()
                    .ok_or_else(|| "--course requires a value".to_string())?;
                let course = CourseId::parse(&course_str).ok_or_else(|| {
                    format!("Invalid course '{}'. Use FACULTY-CODE, e.g. FN-TIT24.", course_str)
                })?;
                options.course = Some(course);
            }
            "--out" => {
                let path = args
                    .next()
                    .ok_or_else(|| "--out requires a path".to_string())?;
                options.out = Some(PathBuf::from(path));
            }
            "--menu" => {
                options.menu = true;
            }
            "--help" => {
                println!(
                    "Usage: uniplan [--week YYYY/MM/DD] [--course FACULTY-CODE] [--out PATH] [--menu]"
                );
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(options)
}

/// CLI course override, then the session endpoint, then the configured
/// fallback course.
async fn resolve_course(options: &CliOptions, config: &Config) -> Option<CourseId> {
    if let Some(course) = &options.course {
        return Some(course.clone());
    }
    let session = SessionClient::new(&config.session.endpoint);
    session
        .course_id()
        .await
        .or_else(|| CourseId::parse(&config.data.default_course))
}

pub async fn run_week_mode(options: &CliOptions) -> anyhow::Result<()> {
    let config = Config::load_or_create()?;
    let course = resolve_course(options, &config).await;

    let today = Local::now().date_naive();
    let mut controller = DashboardController::new(today, config.grid.clone());
    if let Some(date) = options.week {
        // Weeks before the current one stay clamped to the current week.
        let target = current_monday(date);
        while controller.window().selected_monday < target {
            controller.show_next_week();
        }
    }

    let store = AppointmentStore::new(&config.data.dir);
    let token = controller.begin_fetch();
    let days = match &course {
        Some(course) => match store.load_course(course) {
            Ok(days) => Some(days),
            Err(e) => {
                tracing::warn!(course = %course, "failed to load timetable: {e}");
                None
            }
        },
        None => None,
    };
    controller.complete_fetch(token, days);

    write_output(&controller.render(), options.out.as_deref())
}

pub async fn run_menu_mode(options: &CliOptions) -> anyhow::Result<()> {
    let config = Config::load_or_create()?;
    let course = resolve_course(options, &config).await;

    let html = match &course {
        Some(course) => {
            let store = MenuStore::new(&config.data.dir);
            let today = Local::now().date_naive();
            match store.load_for_faculty(course.faculty()) {
                Ok(days) => match find_menu_day(&days, today) {
                    Some(day) => render_menu(day),
                    None => menu_placeholder(),
                },
                Err(e) => {
                    tracing::warn!(faculty = course.faculty(), "failed to load menu: {e}");
                    menu_placeholder()
                }
            }
        }
        None => menu_placeholder(),
    };

    write_output(&html, options.out.as_deref())
}

fn menu_placeholder() -> String {
    r#"<p class="placeholder">No menu data available.</p>"#.to_string()
}

fn write_output(html: &str, out: Option<&std::path::Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => std::fs::write(path, html)?,
        None => println!("{html}"),
    }
    Ok(())
}
