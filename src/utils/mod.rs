pub mod format;
pub mod validate;

pub use format::{format_amount, format_lesson_window};
pub use validate::{parse_due_date, validate_date_bound, validate_question};
