//! binscout CLI - discover which package manager installed each binary on
//! your system, flag the ghosts nobody claims, and surface name collisions.

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
