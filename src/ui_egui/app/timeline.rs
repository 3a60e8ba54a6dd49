use std::time::Instant;

use egui::{pos2, vec2, Align2, Color32, FontId, Rect, Response, Sense, Stroke};

use super::PlannerApp;
use crate::gestures::{EditorRequest, TrackBounds};
use crate::models::block::{TimeBlock, Track};
use crate::services::block::total_hours;
use crate::services::lanes::calculate_lanes;
use crate::ui_egui::palette::{
    block_fill, grid_stroke, BLOCK_SUBTEXT, BLOCK_TEXT, LABEL_TEXT, NOW_LINE, SELECTION_FILL,
    SELECTION_STROKE,
};
use crate::utils::date::today;
use crate::utils::time_grid::{
    format_clock, initial_scroll_offset, now_indicator_offset, BlockGeometry, GridLineKind,
    SLOT_MINUTES, TOTAL_SLOTS,
};

const TIME_LABEL_WIDTH: f32 = 44.0;
const COLUMN_GAP: f32 = 6.0;

/// A block laid out for the current frame.
struct PlacedBlock {
    track: Track,
    block: TimeBlock,
    rect: Rect,
}

fn track_bounds(area: Rect) -> TrackBounds {
    let column_width = (area.width() - TIME_LABEL_WIDTH - COLUMN_GAP) / 2.0;
    let plan_left = area.left() + TIME_LABEL_WIDTH;
    let execution_left = plan_left + column_width + COLUMN_GAP;
    TrackBounds {
        plan: Rect::from_min_size(pos2(plan_left, area.top()), vec2(column_width, area.height())),
        execution: Rect::from_min_size(
            pos2(execution_left, area.top()),
            vec2(column_width, area.height()),
        ),
    }
}

impl PlannerApp {
    pub(super) fn render_timeline(&mut self, ui: &mut egui::Ui) {
        self.render_totals(ui);

        let mut scroll = egui::ScrollArea::vertical()
            .id_source("timeline_scroll")
            .auto_shrink([false, false]);
        if self.scroll_to_now {
            scroll = scroll.vertical_scroll_offset(initial_scroll_offset(
                self.now_minutes,
                self.settings.slot_height_px,
                self.settings.auto_scroll_margin_px,
            ));
            self.scroll_to_now = false;
        }
        scroll.show(ui, |ui| self.render_tracks(ui));
    }

    fn render_totals(&self, ui: &mut egui::Ui) {
        let width = ui.available_width();
        let (row, _) = ui.allocate_exact_size(vec2(width, self.settings.header_offset_px), Sense::hover());
        let bounds = track_bounds(row);
        let painter = ui.painter();

        for track in Track::ALL {
            let blocks = self.store.filter_by_date(track, self.selected_date);
            let rect = bounds.rect(track);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                format!("{}  {}h", track.label(), total_hours(&blocks)),
                FontId::proportional(14.0),
                BLOCK_TEXT,
            );
        }
    }

    fn layout_blocks(&self, bounds: &TrackBounds) -> Vec<PlacedBlock> {
        let slot_height = self.settings.slot_height_px;
        let mut placed = Vec::new();

        for track in Track::ALL {
            let column = bounds.rect(track);
            let blocks = self.store.filter_by_date(track, self.selected_date);
            let lanes = calculate_lanes(&blocks);
            for block in blocks {
                let geometry = BlockGeometry::compute(
                    &block,
                    lanes.get(&block.id),
                    slot_height,
                    self.settings.block_max_width_percent,
                );
                let left = column.left() + column.width() * geometry.left_percent / 100.0;
                let rect = Rect::from_min_size(
                    pos2(left, column.top() + geometry.top),
                    vec2(column.width() * geometry.width_percent / 100.0, geometry.height),
                );
                placed.push(PlacedBlock { track, block, rect });
            }
        }
        placed
    }

    fn render_tracks(&mut self, ui: &mut egui::Ui) {
        let height = TOTAL_SLOTS as f32 * self.settings.slot_height_px;
        let (area, response) =
            ui.allocate_exact_size(vec2(ui.available_width(), height), Sense::click_and_drag());
        let bounds = track_bounds(area);

        let revision = self.store.revision();
        let placed = self.layout_blocks(&bounds);
        self.handle_pointer(ui, &response, &bounds, &placed);
        let placed = if self.store.revision() != revision {
            self.layout_blocks(&bounds)
        } else {
            placed
        };

        if self.drag.is_active() || self.selection.is_active() {
            ui.ctx().request_repaint();
        }

        self.paint_grid(ui, area, &bounds);
        self.paint_blocks(ui, &placed);
        self.paint_selection(ui, &bounds);
        self.paint_now_indicator(ui, area, &bounds);
    }

    fn handle_pointer(
        &mut self,
        ui: &egui::Ui,
        response: &Response,
        bounds: &TrackBounds,
        placed: &[PlacedBlock],
    ) {
        let (pressed, released, pointer) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });
        let Some(pointer) = pointer else {
            return;
        };

        if pressed && response.hovered() && self.editor.is_none() {
            let hit = placed.iter().rev().find(|p| p.rect.contains(pointer));
            if let Some(hit) = hit {
                self.drag.begin(&self.store, hit.track, &hit.block.id, pointer.y);
            } else if let Some(track) = bounds.track_at_x(pointer.x) {
                self.selection
                    .begin(track, pointer, bounds.rect(track), self.drag.is_active());
            }
        }

        if self.drag.is_active() {
            self.drag.update(&mut self.store, pointer, bounds);
        } else if let Some((track, _)) = self.selection.preview() {
            self.selection.update(pointer, bounds.rect(track));
        }

        if released {
            let now = Instant::now();
            if let Some(session) = self.drag.finish(now) {
                if !self.drag.should_suppress_click(now) {
                    if let Some(block) = self.store.get(session.track, &session.id) {
                        let request = EditorRequest::for_block(session.track, block);
                        self.open_editor(request);
                    }
                }
            }
            if let Some(request) = self.selection.finish(self.selected_date) {
                self.open_editor(request);
            }
        }
    }

    fn paint_grid(&self, ui: &egui::Ui, area: Rect, bounds: &TrackBounds) {
        let slot_height = self.settings.slot_height_px;
        let painter = ui.painter();

        for track in Track::ALL {
            painter.rect_filled(bounds.rect(track), 0.0, Color32::WHITE);
        }
        for slot in 0..TOTAL_SLOTS {
            let y = area.top() + (slot + 1) as f32 * slot_height;
            let stroke = grid_stroke(GridLineKind::for_slot(slot));
            for track in Track::ALL {
                painter.hline(bounds.rect(track).x_range(), y, stroke);
            }
        }
        for hour in 0..24 {
            let y = area.top() + (hour * 60 / SLOT_MINUTES) as f32 * slot_height;
            painter.text(
                pos2(area.left() + TIME_LABEL_WIDTH - 6.0, y + 1.0),
                Align2::RIGHT_TOP,
                format_clock(hour * 60),
                FontId::proportional(11.0),
                LABEL_TEXT,
            );
        }
    }

    fn paint_blocks(&self, ui: &egui::Ui, placed: &[PlacedBlock]) {
        let dragging = self.drag.dragging_id();

        for PlacedBlock { block, rect, .. } in placed {
            let rect = rect.shrink2(vec2(1.0, 0.5));
            let painter = ui.painter().with_clip_rect(rect);
            painter.rect_filled(rect, 4.0, block_fill(block.color));
            if dragging == Some(&block.id) {
                painter.rect_stroke(rect, 4.0, Stroke::new(2.0, SELECTION_STROKE));
            }

            let mut y = rect.top() + 2.0;
            painter.text(
                pos2(rect.left() + 4.0, y),
                Align2::LEFT_TOP,
                &block.title,
                FontId::proportional(12.0),
                BLOCK_TEXT,
            );
            y += 14.0;
            if rect.bottom() - y >= 12.0 {
                painter.text(
                    pos2(rect.left() + 4.0, y),
                    Align2::LEFT_TOP,
                    format!("{} - {}", format_clock(block.start), format_clock(block.end)),
                    FontId::proportional(10.0),
                    BLOCK_SUBTEXT,
                );
                y += 12.0;
            }
            if let Some(ref description) = block.description {
                if rect.bottom() - y >= 12.0 {
                    painter.text(
                        pos2(rect.left() + 4.0, y),
                        Align2::LEFT_TOP,
                        description,
                        FontId::proportional(10.0),
                        BLOCK_SUBTEXT,
                    );
                }
            }
        }
    }

    fn paint_selection(&self, ui: &egui::Ui, bounds: &TrackBounds) {
        let Some((track, range)) = self.selection.preview() else {
            return;
        };
        let column = bounds.rect(track);
        let slot_height = self.settings.slot_height_px;
        let rect = Rect::from_x_y_ranges(
            column.x_range(),
            column.top() + range.start as f32 * slot_height
                ..=column.top() + range.end as f32 * slot_height,
        );

        let painter = ui.painter();
        painter.rect_filled(rect, 4.0, SELECTION_FILL);
        painter.rect_stroke(rect, 4.0, Stroke::new(1.5, SELECTION_STROKE));
        painter.text(
            pos2(rect.left() + 4.0, rect.top() + 2.0),
            Align2::LEFT_TOP,
            format!(
                "{} - {}",
                format_clock(range.start_minutes()),
                format_clock(range.end_minutes())
            ),
            FontId::proportional(11.0),
            SELECTION_STROKE,
        );
    }

    fn paint_now_indicator(&self, ui: &egui::Ui, area: Rect, bounds: &TrackBounds) {
        if self.selected_date != today() {
            return;
        }
        let y = area.top() + now_indicator_offset(self.now_minutes, self.settings.slot_height_px);
        let painter = ui.painter();
        painter.circle_filled(pos2(bounds.plan.left() - 4.0, y), 3.5, NOW_LINE);
        painter.hline(
            bounds.plan.left()..=bounds.execution.right(),
            y,
            Stroke::new(2.0, NOW_LINE),
        );
    }
}
