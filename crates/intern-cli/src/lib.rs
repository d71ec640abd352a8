//! Command-line front end for the internship importer.

pub mod commands;
pub mod config;
pub mod logging;
pub mod summary;
