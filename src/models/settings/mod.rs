// Settings module
// Layout and behaviour knobs read from config.toml

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// Pixel height of one 10-minute slot.
    pub slot_height_px: f32,
    /// Share of a track's width that blocks may occupy, split between lanes.
    pub block_max_width_percent: f32,
    /// How long after a drag ends a click on the block is still swallowed.
    pub click_suppress_grace_ms: u64,
    /// Multi-day bars shown before the strip collapses into "N more".
    pub collapsed_multi_day_limit: usize,
    pub header_offset_px: f32,
    /// Gap kept above the current time when the timeline first opens.
    pub auto_scroll_margin_px: f32,
    pub default_top_message: String,
    /// Overrides the default `<data dir>/planner.db`.
    pub database_path: Option<PathBuf>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            slot_height_px: 16.0,
            block_max_width_percent: 85.0,
            click_suppress_grace_ms: 100,
            collapsed_multi_day_limit: 2,
            header_offset_px: 44.0,
            auto_scroll_margin_px: 200.0,
            default_top_message: "Keep going!".to_string(),
            database_path: None,
        }
    }
}

impl PlannerSettings {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.slot_height_px.is_finite() && self.slot_height_px > 0.0) {
            return Err(format!(
                "slot_height_px must be positive, got {}",
                self.slot_height_px
            ));
        }
        if !(self.block_max_width_percent > 0.0 && self.block_max_width_percent <= 100.0) {
            return Err(format!(
                "block_max_width_percent must be in (0, 100], got {}",
                self.block_max_width_percent
            ));
        }
        if self.auto_scroll_margin_px < 0.0 {
            return Err("auto_scroll_margin_px cannot be negative".to_string());
        }
        Ok(())
    }

    pub fn click_suppress_grace(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.click_suppress_grace_ms)
    }
}
