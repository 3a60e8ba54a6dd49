mod app;
mod editor_dialog;
pub mod palette;

pub use app::PlannerApp;
