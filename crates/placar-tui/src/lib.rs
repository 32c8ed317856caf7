// Terminal front end for the match results dashboard.

pub mod app;
pub mod report;
pub mod tui;
