//! Small helpers shared by the hub and the view consumers

pub mod string;
pub mod sync;
