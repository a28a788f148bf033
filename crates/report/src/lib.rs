#![allow(clippy::format_push_string)]

pub mod render;

pub use render::{render_report, write_report, ReportRow};
