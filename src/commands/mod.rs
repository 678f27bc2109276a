//! CLI commands

pub mod list;
pub mod post;
