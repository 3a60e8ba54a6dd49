use egui::{Color32, Stroke};

use crate::models::block::BlockColor;
use crate::utils::time_grid::GridLineKind;

pub const BLOCK_TEXT: Color32 = Color32::from_rgb(39, 39, 42);
pub const BLOCK_SUBTEXT: Color32 = Color32::from_rgb(82, 82, 91);
pub const NOW_LINE: Color32 = Color32::from_rgb(239, 68, 68);
pub const SELECTION_FILL: Color32 = Color32::from_rgba_premultiplied(59, 130, 246, 60);
pub const SELECTION_STROKE: Color32 = Color32::from_rgb(59, 130, 246);
pub const LABEL_TEXT: Color32 = Color32::from_rgb(113, 113, 122);
pub const SELECTED_DAY: Color32 = Color32::from_rgb(24, 24, 27);
pub const RANGE_FILL: Color32 = Color32::from_rgb(219, 234, 254);

/// Pastel fill for a palette token.
pub fn block_fill(color: BlockColor) -> Color32 {
    match color {
        BlockColor::Pink => Color32::from_rgb(251, 207, 232),
        BlockColor::Green => Color32::from_rgb(187, 247, 208),
        BlockColor::Orange => Color32::from_rgb(254, 215, 170),
        BlockColor::Yellow => Color32::from_rgb(254, 240, 138),
        BlockColor::Blue => Color32::from_rgb(191, 219, 254),
        BlockColor::Purple => Color32::from_rgb(233, 213, 255),
        BlockColor::Red => Color32::from_rgb(254, 202, 202),
        BlockColor::Teal => Color32::from_rgb(153, 246, 228),
        BlockColor::Gray => Color32::from_rgb(228, 228, 231),
    }
}

pub fn grid_stroke(kind: GridLineKind) -> Stroke {
    match kind {
        GridLineKind::Hour => Stroke::new(1.0, Color32::from_rgb(212, 212, 216)),
        GridLineKind::HalfHour => Stroke::new(1.0, Color32::from_rgb(228, 228, 231)),
        GridLineKind::Regular => Stroke::new(0.5, Color32::from_rgb(244, 244, 245)),
    }
}
