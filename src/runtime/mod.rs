pub mod busy;
pub mod lifetime;
