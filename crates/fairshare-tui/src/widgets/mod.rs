//! Reusable rendering helpers shared by screens.

pub mod rate_fmt;
pub mod sub_tabs;
