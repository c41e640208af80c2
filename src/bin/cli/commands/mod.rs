pub mod concepts;
pub mod config;
pub mod dashboard;
pub mod quiz;
pub mod sheet;
