//! Terminal display helpers: tables, status styling and progress spinners.

pub mod progress;
pub mod table;

pub use progress::create_spinner;
pub use table::{list_table, render_list, styled_label, styled_status};
