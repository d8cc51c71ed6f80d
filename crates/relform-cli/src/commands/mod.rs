//! CLI subcommands

pub mod completions;
pub mod config;
pub mod groups;
pub mod related_user;
pub mod session;
