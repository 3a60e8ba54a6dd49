mod header;
mod timeline;

use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};

use super::editor_dialog::{render_editor_dialog, EditorDialogAction, EditorDialogState};
use crate::gestures::{DateRangeController, DragMoveController, EditorRequest, SelectionController};
use crate::models::settings::PlannerSettings;
use crate::services::block::BlockStore;
use crate::services::storage::{KeyValueStore, PlannerSnapshot};
use crate::utils::time_grid::minutes_of_day;

const CLOCK_TICK: Duration = Duration::from_secs(60);
/// Minimum gap between save attempts after a failed write.
const SAVE_RETRY: Duration = Duration::from_secs(5);

pub struct PlannerApp {
    settings: PlannerSettings,
    /// Single owner of both block collections
    store: BlockStore,
    storage: Box<dyn KeyValueStore>,
    persisted_revision: u64,
    last_save_failure: Option<Instant>,
    selected_date: NaiveDate,
    selection: SelectionController,
    drag: DragMoveController,
    date_range: DateRangeController,
    editor: Option<EditorDialogState>,
    /// Draft text while the header message is being edited
    message_draft: Option<String>,
    multi_day_expanded: bool,
    now_minutes: u32,
    last_clock_tick: Instant,
    scroll_to_now: bool,
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick_clock(ctx);

        egui::TopBottomPanel::top("planner_header").show(ctx, |ui| {
            self.render_header(ui);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_timeline(ui);
        });
        self.render_editor(ctx);

        self.persist_if_changed();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_pending();
    }
}

impl PlannerApp {
    pub fn new(settings: PlannerSettings, storage: Box<dyn KeyValueStore>) -> Self {
        let today = Local::now().date_naive();
        let fallback = PlannerSnapshot::defaults(today, &settings.default_top_message);
        let store = PlannerSnapshot::hydrate(storage.as_ref(), fallback).into_store();
        log::info!(
            "Loaded {} plan and {} execution blocks",
            store.blocks(crate::models::block::Track::Plan).len(),
            store.blocks(crate::models::block::Track::Execution).len()
        );

        Self {
            selection: SelectionController::new(settings.slot_height_px),
            drag: DragMoveController::new(settings.slot_height_px, settings.click_suppress_grace()),
            date_range: DateRangeController::new(),
            persisted_revision: store.revision(),
            last_save_failure: None,
            store,
            storage,
            selected_date: today,
            editor: None,
            message_draft: None,
            multi_day_expanded: false,
            now_minutes: minutes_of_day(Local::now().time()),
            last_clock_tick: Instant::now(),
            scroll_to_now: true,
            settings,
        }
    }

    fn tick_clock(&mut self, ctx: &egui::Context) {
        if self.last_clock_tick.elapsed() >= CLOCK_TICK {
            self.now_minutes = minutes_of_day(Local::now().time());
            self.last_clock_tick = Instant::now();
        }
        ctx.request_repaint_after(CLOCK_TICK.saturating_sub(self.last_clock_tick.elapsed()));
    }

    fn open_editor(&mut self, request: EditorRequest) {
        self.editor = Some(EditorDialogState::new(request));
    }

    fn render_editor(&mut self, ctx: &egui::Context) {
        let Some(state) = self.editor.as_mut() else {
            return;
        };

        match render_editor_dialog(ctx, state) {
            EditorDialogAction::None => {}
            EditorDialogAction::Cancel => self.editor = None,
            EditorDialogAction::Save => match state.request.apply(&mut self.store) {
                Ok(_) => self.editor = None,
                Err(e) => state.error = Some(e.to_string()),
            },
            EditorDialogAction::Delete => {
                state.request.delete(&mut self.store);
                self.editor = None;
            }
        }
    }

    /// Save once per frame when the store changed, backing off after a
    /// failed write.
    fn persist_if_changed(&mut self) {
        if let Some(failed_at) = self.last_save_failure {
            if failed_at.elapsed() < SAVE_RETRY {
                return;
            }
        }
        self.save_pending();
    }

    /// Write the snapshot if anything is unsaved. A failed write leaves the
    /// revision pending so a later attempt picks it up.
    fn save_pending(&mut self) -> bool {
        let revision = self.store.revision();
        if revision == self.persisted_revision {
            return true;
        }
        match PlannerSnapshot::from_store(&self.store).persist(self.storage.as_mut()) {
            Ok(()) => {
                self.persisted_revision = revision;
                self.last_save_failure = None;
                true
            }
            Err(e) => {
                log::error!("Failed to save planner state: {:#}", e);
                self.last_save_failure = Some(Instant::now());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::{MemoryKeyValueStore, TOP_MESSAGE_KEY};
    use anyhow::{bail, Result};

    /// Memory store whose next `failures` writes are rejected.
    struct FlakyStore {
        inner: MemoryKeyValueStore,
        failures: u32,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            if self.failures > 0 {
                self.failures -= 1;
                bail!("disk full while writing {}", key);
            }
            self.inner.set(key, value)
        }
    }

    fn app_with_failures(failures: u32) -> PlannerApp {
        let storage = FlakyStore {
            inner: MemoryKeyValueStore::new(),
            failures,
        };
        PlannerApp::new(PlannerSettings::default(), Box::new(storage))
    }

    fn saved_message(app: &PlannerApp) -> Option<String> {
        app.storage.get(TOP_MESSAGE_KEY).unwrap()
    }

    #[test]
    fn test_failed_save_is_retried_on_exit() {
        let mut app = app_with_failures(1);
        app.store.set_top_message("Last edit before exit");

        app.persist_if_changed();
        assert_ne!(app.persisted_revision, app.store.revision());
        assert!(app.last_save_failure.is_some());
        assert_eq!(saved_message(&app), None);

        assert!(app.save_pending());
        assert_eq!(app.persisted_revision, app.store.revision());
        assert!(app.last_save_failure.is_none());
        assert_eq!(saved_message(&app).as_deref(), Some("Last edit before exit"));
    }

    #[test]
    fn test_frame_saves_back_off_after_failure() {
        let mut app = app_with_failures(1);
        app.store.set_top_message("Exam week");

        app.persist_if_changed();
        // the store would accept this write, but the retry window is still open
        app.persist_if_changed();
        assert_eq!(saved_message(&app), None);

        app.last_save_failure = Some(Instant::now() - SAVE_RETRY);
        app.persist_if_changed();
        assert_eq!(saved_message(&app).as_deref(), Some("Exam week"));
    }

    #[test]
    fn test_unchanged_store_is_not_rewritten() {
        let mut app = app_with_failures(u32::MAX);
        assert!(app.save_pending());
        assert!(app.last_save_failure.is_none());
    }
}
