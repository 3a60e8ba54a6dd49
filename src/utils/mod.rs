pub mod date;
pub mod time_grid;
