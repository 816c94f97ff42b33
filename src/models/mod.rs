pub mod assignments;
pub mod common;
pub mod homeworks;
pub mod lessons;

pub use common::response::ErrorBody;
