pub mod api;
pub mod calendar;
pub mod cli;
pub mod core;
