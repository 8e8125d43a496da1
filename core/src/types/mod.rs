pub mod config;
pub mod param;

pub use config::{SeedParam, Settings};
pub use param::{Model, Param, ParamEntry, ParamId, ParamType, ParamValue};
