pub mod format;
pub mod theme;
