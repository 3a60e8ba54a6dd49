use chrono::Datelike;
use egui::{pos2, vec2, Align2, FontId, Rect, RichText, Sense};

use super::PlannerApp;
use crate::gestures::date_range::hit_test;
use crate::gestures::{DateRangeOutcome, EditorRequest};
use crate::models::block::Track;
use crate::services::multi_day::{hidden_span_count, visible_spans, weekly_spans};
use crate::ui_egui::palette::{block_fill, BLOCK_TEXT, LABEL_TEXT, RANGE_FILL, SELECTED_DAY};
use crate::utils::date::{format_display_date, shift_days, shift_months, today, week_dates, DAY_NAMES};

const DAY_CELL_HEIGHT: f32 = 44.0;
const SPAN_BAR_HEIGHT: f32 = 18.0;

impl PlannerApp {
    pub(super) fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.add_space(6.0);
        self.render_top_message(ui);
        ui.add_space(4.0);
        self.render_date_navigation(ui);
        ui.add_space(4.0);
        self.render_week_strip(ui);
        ui.add_space(6.0);
    }

    fn render_top_message(&mut self, ui: &mut egui::Ui) {
        if self.message_draft.is_none() {
            let label = ui.add(
                egui::Label::new(RichText::new(self.store.top_message()).size(20.0).strong())
                    .sense(Sense::click()),
            );
            if label.on_hover_text("Click to edit").clicked() {
                self.message_draft = Some(self.store.top_message().to_string());
            }
            return;
        }
        let Some(draft) = self.message_draft.as_mut() else {
            return;
        };

        let response = ui.add(egui::TextEdit::singleline(draft).font(egui::TextStyle::Heading));
        if !response.has_focus() && !response.lost_focus() {
            response.request_focus();
        }

        if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.message_draft = None;
        } else if response.lost_focus() {
            let text = std::mem::take(draft);
            self.store.set_top_message(&text);
            self.message_draft = None;
        }
    }

    fn render_date_navigation(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("«").on_hover_text("Previous month").clicked() {
                self.selected_date = shift_months(self.selected_date, -1);
            }
            if ui.button("‹").on_hover_text("Previous day").clicked() {
                self.selected_date = shift_days(self.selected_date, -1);
            }
            ui.label(RichText::new(format_display_date(self.selected_date)).size(16.0));
            if ui.button("›").on_hover_text("Next day").clicked() {
                self.selected_date = shift_days(self.selected_date, 1);
            }
            if ui.button("»").on_hover_text("Next month").clicked() {
                self.selected_date = shift_months(self.selected_date, 1);
            }
            ui.add(
                egui_extras::DatePickerButton::new(&mut self.selected_date)
                    .id_source("header_date_picker"),
            );
            if ui.button("Today").clicked() {
                self.selected_date = today();
            }
        });
    }

    fn render_week_strip(&mut self, ui: &mut egui::Ui) {
        let week = week_dates(self.selected_date);
        let width = ui.available_width();
        let cell_width = width / 7.0;
        let (strip, _) = ui.allocate_exact_size(vec2(width, DAY_CELL_HEIGHT), Sense::hover());

        let cells: Vec<Rect> = (0..7)
            .map(|i| {
                let left = strip.left() + i as f32 * cell_width;
                Rect::from_min_max(pos2(left, strip.top()), pos2(left + cell_width, strip.bottom()))
            })
            .collect();

        let mut pressed_cell = None;
        for (i, cell) in cells.iter().enumerate() {
            let response = ui.interact(*cell, ui.id().with(("week_cell", i)), Sense::click_and_drag());
            if response.is_pointer_button_down_on() && !self.date_range.is_active() {
                pressed_cell = Some(i);
            }
        }
        if let Some(i) = pressed_cell {
            self.date_range.begin(i);
        }

        let (pointer, released) = ui.input(|i| (i.pointer.interact_pos(), i.pointer.any_released()));
        if self.date_range.is_active() {
            self.date_range.update(pointer.and_then(|p| hit_test(&cells, p)));
        }

        let highlighted = self.date_range.highlighted();
        let painter = ui.painter();
        for (i, (cell, date)) in cells.iter().zip(week.iter()).enumerate() {
            let in_range = highlighted.map_or(false, |(lo, hi)| (lo..=hi).contains(&i));
            if in_range {
                painter.rect_filled(cell.shrink(2.0), 6.0, RANGE_FILL);
            }
            let is_selected = *date == self.selected_date;
            if is_selected {
                painter.rect_filled(cell.shrink(4.0), 6.0, SELECTED_DAY);
            }
            let text_color = if is_selected { egui::Color32::WHITE } else { BLOCK_TEXT };
            painter.text(
                pos2(cell.center().x, cell.top() + 12.0),
                Align2::CENTER_CENTER,
                DAY_NAMES[i],
                FontId::proportional(11.0),
                if is_selected { text_color } else { LABEL_TEXT },
            );
            painter.text(
                pos2(cell.center().x, cell.top() + 30.0),
                Align2::CENTER_CENTER,
                date.day().to_string(),
                FontId::proportional(15.0),
                text_color,
            );
        }

        if released && self.date_range.is_active() {
            match self.date_range.finish(&week) {
                Some(DateRangeOutcome::Navigate(date)) => self.selected_date = date,
                Some(DateRangeOutcome::CreateMultiDay(request)) => self.open_editor(request),
                None => {}
            }
        }

        self.render_multi_day_bars(ui, &week, &cells);
    }

    fn render_multi_day_bars(&mut self, ui: &mut egui::Ui, week: &[chrono::NaiveDate; 7], cells: &[Rect]) {
        let spans = weekly_spans(self.store.blocks(Track::Plan), week);
        if spans.is_empty() {
            return;
        }
        let limit = self.settings.collapsed_multi_day_limit;

        let mut clicked_group = None;
        for span in visible_spans(&spans, self.multi_day_expanded, limit) {
            ui.add_space(2.0);
            let (row, _) = ui.allocate_exact_size(vec2(ui.available_width(), SPAN_BAR_HEIGHT), Sense::hover());
            let bar = Rect::from_min_max(
                pos2(cells[span.start_idx].left() + 2.0, row.top()),
                pos2(cells[span.end_idx].right() - 2.0, row.bottom()),
            );
            let response = ui.interact(bar, ui.id().with(("span", span.group_id.as_str())), Sense::click());
            ui.painter().rect_filled(bar, 4.0, block_fill(span.color));
            ui.painter().with_clip_rect(bar).text(
                pos2(bar.left() + 6.0, bar.center().y),
                Align2::LEFT_CENTER,
                &span.title,
                FontId::proportional(12.0),
                BLOCK_TEXT,
            );
            let hover = format!("{} ({} days this week)", span.title, span.day_count());
            if response.on_hover_text(hover).clicked() {
                clicked_group = Some(span.group_id.clone());
            }
        }

        let hidden = hidden_span_count(&spans, limit);
        if hidden > 0 {
            let label = if self.multi_day_expanded {
                "Show less".to_string()
            } else {
                format!("{} more", hidden)
            };
            if ui.small_button(label).clicked() {
                self.multi_day_expanded = !self.multi_day_expanded;
            }
        }

        if let Some(group_id) = clicked_group {
            if let Some(request) = EditorRequest::for_group(&self.store, &group_id) {
                self.open_editor(request);
            }
        }
    }
}
