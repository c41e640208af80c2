//! Printable and terminal renderings of the cheat sheet

pub mod print;
pub mod text;

pub use print::{render_print_html, PrintOptions};
pub use text::{render_page_lines, render_pages_plain};
