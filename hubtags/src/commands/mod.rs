/// Tag listing
pub mod tags;
