pub mod html;

pub use html::{render_menu, render_placeholder, render_week};
