//! Command-line surface: flags, subcommands and their handlers

pub mod commands;
pub mod doctor;
pub mod setup;
