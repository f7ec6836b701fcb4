pub mod dot;
pub mod json;
pub mod text;

pub use dot::{DotFormatter, Layout};
pub use json::JsonFormatter;
pub use text::TextReportFormatter;
