#![deny(clippy::all)]

pub mod app;
pub mod commands;
pub mod echo;
pub mod error;
pub mod telemetry;
