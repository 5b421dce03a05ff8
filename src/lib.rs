pub mod map;
pub mod tracking;
pub mod viz;
