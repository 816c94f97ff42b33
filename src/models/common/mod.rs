pub mod amount;
pub mod response;
