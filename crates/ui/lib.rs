pub mod data;
pub mod tui;
