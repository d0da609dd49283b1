//! Paints computed layouts onto an HTML surface.
//!
//! All layout decisions happen in `timetable::layout`; this adapter only
//! turns placed blocks into markup. Every render produces the full table
//! from scratch, so repainting the same week twice yields identical output.

use std::fmt::Write;

use crate::storage::menu::MenuDay;
use crate::timetable::grid::{GridConfig, GridSkeleton};
use crate::timetable::layout::{DisplayMode, PlacedBlock, WeekLayout};

/// Shown instead of the grid when no appointment data could be loaded.
pub fn render_placeholder() -> String {
    r#"<p class="placeholder">No timetable data available for this course.</p>"#.to_string()
}

/// Renders one week of placed appointment blocks as a timetable.
pub fn render_week(layout: &WeekLayout, config: &GridConfig) -> String {
    let skeleton = GridSkeleton::build(layout.week_start, config);
    let slots_per_hour = config.slots_per_hour();

    let mut html = String::from("<table><thead><tr><th>Time</th>");
    for header in &skeleton.headers {
        let _ = write!(
            html,
            r#"<th id="{key}-head">{label}<br>{date}</th>"#,
            key = header.key.key(),
            label = header.key.label(),
            date = header.date_label,
        );
    }
    html.push_str("</tr></thead><tbody>");

    for (row, grid_row) in skeleton.rows.iter().enumerate() {
        html.push_str("<tr>");
        if let Some(hour_label) = &grid_row.hour_label {
            let _ = write!(
                html,
                r#"<td class="time" rowspan="{slots_per_hour}">{hour_label}</td>"#,
            );
        }
        for day in &layout.days {
            let _ = write!(
                html,
                r#"<td data-day="{key}" data-time="{time}">"#,
                key = day.key.key(),
                time = grid_row.time_label,
            );
            for block in day.blocks.iter().filter(|b| b.row == row) {
                html.push_str(&render_block(block));
            }
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table>");
    html
}

/// One appointment block, overlaid on its starting slot. The block spans
/// downward visually via its height; the grid rows underneath stay intact.
fn render_block(block: &PlacedBlock) -> String {
    let height_pct = block.height_units * 100;
    let style = match block.mode {
        DisplayMode::Single => format!("height:{height_pct}%"),
        _ => format!("left:{}%;height:{height_pct}%", block.left_pct),
    };

    let mut body = escape(&block.name);
    if let Some(location) = &block.location {
        body.push_str("<br>");
        body.push_str(&escape(location));
    }

    format!(
        r#"<div class="{class}" style="{style}">{body}</div>"#,
        class = block.mode.css_class(),
    )
}

/// Renders one day of the cafeteria menu as a list of dishes.
pub fn render_menu(day: &MenuDay) -> String {
    let mut html = format!(r#"<div class="mensa" data-date="{}">"#, escape(&day.date_label));
    for dish in &day.dishes {
        let _ = write!(
            html,
            r#"<div class="item"><span class="category">{}</span> {}"#,
            escape(&dish.category),
            escape(&dish.name),
        );
        if let Some(prices) = &dish.prices {
            let _ = write!(html, r#" <span class="prices">{}</span>"#, escape(prices));
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
