use chrono::NaiveDate;
use egui::{Color32, RichText};
use egui_extras::DatePickerButton;

use super::palette::block_fill;
use crate::gestures::{EditorMode, EditorRequest};
use crate::models::block::{BlockColor, Track, MAX_DESCRIPTION_CHARS, MAX_TITLE_CHARS};
use crate::utils::date::format_display_date;
use crate::utils::time_grid::{format_clock, time_options};

/// Open editor window plus the last save error, if any.
pub struct EditorDialogState {
    pub request: EditorRequest,
    pub error: Option<String>,
}

impl EditorDialogState {
    pub fn new(request: EditorRequest) -> Self {
        Self {
            request,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorDialogAction {
    None,
    Save,
    Delete,
    Cancel,
}

pub fn render_editor_dialog(ctx: &egui::Context, state: &mut EditorDialogState) -> EditorDialogAction {
    let mut action = EditorDialogAction::None;
    let mut open = true;
    let request = &mut state.request;

    let title = match (request.mode, request.is_multi_day) {
        (EditorMode::Add, true) => "New multi-day plan",
        (EditorMode::Add, false) => "New block",
        (EditorMode::Edit, true) => "Edit multi-day plan",
        (EditorMode::Edit, false) => "Edit block",
    };

    egui::Window::new(title)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new(request.track.label()).color(Color32::GRAY));

            ui.label("Title");
            let title_edit = ui.add(
                egui::TextEdit::singleline(&mut request.title)
                    .char_limit(MAX_TITLE_CHARS)
                    .hint_text("What are you doing?")
                    .desired_width(f32::INFINITY),
            );
            if request.mode == EditorMode::Add && request.title.is_empty() {
                title_edit.request_focus();
            }

            ui.label("Description");
            ui.add(
                egui::TextEdit::multiline(&mut request.description)
                    .char_limit(MAX_DESCRIPTION_CHARS)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY),
            );

            ui.add_space(6.0);
            render_time_row(ui, request);

            if request.is_multi_day && request.track == Track::Plan {
                ui.add_space(6.0);
                render_date_row(ui, request);
            } else {
                ui.label(
                    RichText::new(format_display_date(request.start_date)).color(Color32::GRAY),
                );
            }

            ui.add_space(6.0);
            render_color_row(ui, &mut request.color);

            if let Some(ref error) = state.error {
                ui.add_space(4.0);
                ui.colored_label(Color32::from_rgb(220, 38, 38), error);
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(request.can_save(), egui::Button::new("Save"))
                    .clicked()
                {
                    action = EditorDialogAction::Save;
                }
                if ui.button("Cancel").clicked() {
                    action = EditorDialogAction::Cancel;
                }
                if request.can_delete() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let delete = egui::Button::new(
                            RichText::new("Delete").color(Color32::from_rgb(220, 38, 38)),
                        );
                        if ui.add(delete).clicked() {
                            action = EditorDialogAction::Delete;
                        }
                    });
                }
            });
        });

    if !open {
        action = EditorDialogAction::Cancel;
    }
    action
}

fn render_time_row(ui: &mut egui::Ui, request: &mut EditorRequest) {
    ui.horizontal(|ui| {
        ui.label("From");
        egui::ComboBox::from_id_source("editor_start_time")
            .selected_text(format_clock(request.start_minutes))
            .show_ui(ui, |ui| {
                for minutes in time_options(false) {
                    ui.selectable_value(&mut request.start_minutes, minutes, format_clock(minutes));
                }
            });

        ui.label("to");
        let start = request.start_minutes;
        egui::ComboBox::from_id_source("editor_end_time")
            .selected_text(format_clock(request.end_minutes))
            .show_ui(ui, |ui| {
                for minutes in time_options(true).into_iter().filter(|m| *m > start) {
                    ui.selectable_value(&mut request.end_minutes, minutes, format_clock(minutes));
                }
            });
    });
}

fn render_date_row(ui: &mut egui::Ui, request: &mut EditorRequest) {
    ui.horizontal(|ui| {
        ui.label("Dates");
        let mut start: NaiveDate = request.start_date;
        let mut end: NaiveDate = request.end_date;
        ui.add(DatePickerButton::new(&mut start).id_source("editor_start_date"));
        ui.label("-");
        ui.add(DatePickerButton::new(&mut end).id_source("editor_end_date"));
        request.start_date = start;
        request.end_date = end.max(start);
    });
}

fn render_color_row(ui: &mut egui::Ui, selected: &mut BlockColor) {
    ui.horizontal(|ui| {
        for color in BlockColor::ALL.into_iter().chain([BlockColor::Gray]) {
            let (rect, response) =
                ui.allocate_exact_size(egui::vec2(22.0, 22.0), egui::Sense::click());
            ui.painter().circle_filled(rect.center(), 10.0, block_fill(color));
            if *selected == color {
                ui.painter().circle_stroke(
                    rect.center(),
                    10.0,
                    egui::Stroke::new(2.0, Color32::from_rgb(24, 24, 27)),
                );
            }
            if response.on_hover_text(color.token()).clicked() {
                *selected = color;
            }
        }
    });
}
