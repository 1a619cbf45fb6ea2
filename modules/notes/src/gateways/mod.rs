pub mod error_map;
pub mod local;
