pub mod html;
pub mod terminal;

pub use html::{escape_html, render_card, render_list};
