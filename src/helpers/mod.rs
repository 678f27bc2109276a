//! Helper functions for dates, word counts and HTML fragments

mod date;
mod html;
mod words;

pub use date::*;
pub use html::*;
pub use words::*;
