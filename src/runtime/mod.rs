pub mod lifetime;
pub mod modes;
