//! Workspace state and egui layout for the desktop surface.
//!
//! The state machine is deliberately small: a transcript, the canvas
//! fields, the pane split, and two `Instant` deadlines (the simulated
//! assistant reply and the one-shot learning animation) polled from
//! `update`.

use eframe::egui;
use shikibu_core::{chat_reply, CoreConfig, Message, OutputStore, Role, SavedDocument, GREETING};
use std::time::{Duration, Instant};

/// Pane split bounds, in percent of the window width.
pub const PANE_MIN_PCT: f32 = 20.0;
pub const PANE_MAX_PCT: f32 = 80.0;

/// Delay before the simulated assistant reply appears.
const REPLY_DELAY: Duration = Duration::from_secs(1);

/// Length of the one-shot learning animation.
const LEARN_DELAY: Duration = Duration::from_secs(3);

const SAVED_STATUS: &str = "保存しました！";
const LEARN_DONE_STATUS: &str = "学習完了！あなたの文章パターンを分析しました。";

/// Clamps a requested split position into the allowed range.
pub fn clamp_pane(pct: f32) -> f32 {
    pct.clamp(PANE_MIN_PCT, PANE_MAX_PCT)
}

pub struct StudioApp {
    app_name: String,
    messages: Vec<Message>,
    input: String,
    canvas_title: String,
    canvas_content: String,
    left_pane_pct: f32,
    pending_reply: Option<Instant>,
    learning_until: Option<Instant>,
    status: Option<String>,
    outputs: OutputStore,
}

impl StudioApp {
    pub fn new(config: CoreConfig, outputs: OutputStore) -> Self {
        Self {
            app_name: config.app_name,
            messages: vec![Message::assistant(GREETING)],
            input: String::new(),
            canvas_title: String::new(),
            canvas_content: String::new(),
            left_pane_pct: 50.0,
            pending_reply: None,
            learning_until: None,
            status: None,
            outputs,
        }
    }

    /// Appends the typed message and schedules the simulated reply.
    /// Blank input is ignored.
    fn send_message(&mut self, now: Instant) {
        if self.input.trim().is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.input);
        self.messages.push(Message::user(text));
        self.pending_reply = Some(now + REPLY_DELAY);
    }

    /// Saves the canvas into the output store and clears the editor.
    /// Blank content is a strict no-op.
    fn save_canvas(&mut self) {
        if self.canvas_content.trim().is_empty() {
            return;
        }
        let doc = SavedDocument::new(&self.canvas_title, &self.canvas_content);
        match self.outputs.append(&doc) {
            Ok(()) => {
                self.canvas_content.clear();
                self.canvas_title.clear();
                self.status = Some(SAVED_STATUS.to_string());
            }
            Err(e) => {
                self.status = Some(format!("保存に失敗しました: {e}"));
            }
        }
    }

    fn start_learning(&mut self, now: Instant) {
        if self.learning_until.is_none() {
            self.learning_until = Some(now + LEARN_DELAY);
        }
    }

    fn is_learning(&self) -> bool {
        self.learning_until.is_some()
    }

    /// Fires any due deadlines.
    fn poll_timers(&mut self, now: Instant) {
        if self.pending_reply.is_some_and(|due| now >= due) {
            self.pending_reply = None;
            self.messages.push(Message::assistant(chat_reply()));
        }
        if self.learning_until.is_some_and(|due| now >= due) {
            self.learning_until = None;
            self.status = Some(LEARN_DONE_STATUS.to_string());
        }
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_timers(Instant::now());
        if self.pending_reply.is_some() || self.learning_until.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(&self.app_name);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let label = if self.is_learning() { "学習中..." } else { "OverDrive" };
                    if ui.add_enabled(!self.is_learning(), egui::Button::new(label)).clicked() {
                        self.start_learning(Instant::now());
                    }
                });
            });
        });

        if let Some(status) = self.status.clone() {
            egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(status);
                    if ui.small_button("閉じる").clicked() {
                        self.status = None;
                    }
                });
            });
        }

        let full_width = ctx.screen_rect().width().max(1.0);
        egui::SidePanel::left("chat_pane")
            .resizable(true)
            .default_width(full_width * self.left_pane_pct / 100.0)
            .width_range(full_width * PANE_MIN_PCT / 100.0..=full_width * PANE_MAX_PCT / 100.0)
            .show(ctx, |ui| {
                self.left_pane_pct = clamp_pane(ui.available_width() / full_width * 100.0);
                self.chat_pane(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas_pane(ui);
        });
    }
}

impl StudioApp {
    fn chat_pane(&mut self, ui: &mut egui::Ui) {
        let input_row = 36.0;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .max_height(ui.available_height() - input_row)
            .show(ui, |ui| {
                for msg in &self.messages {
                    let align = match msg.role {
                        Role::User => egui::Align::Max,
                        Role::Assistant => egui::Align::Min,
                    };
                    ui.with_layout(egui::Layout::top_down(align), |ui| {
                        egui::Frame::group(ui.style()).show(ui, |ui| {
                            ui.label(&msg.content);
                        });
                    });
                    ui.add_space(4.0);
                }
            });

        ui.separator();
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.input).hint_text("メッセージを入力..."),
            );
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("送信").clicked() || submitted {
                self.send_message(Instant::now());
                response.request_focus();
            }
        });
    }

    fn canvas_pane(&mut self, ui: &mut egui::Ui) {
        ui.add(
            egui::TextEdit::singleline(&mut self.canvas_title)
                .hint_text("タイトルを入力...")
                .desired_width(f32::INFINITY),
        );
        ui.separator();

        let footer = 32.0;
        let editor_height = (ui.available_height() - footer).max(0.0);
        ui.add_sized(
            [ui.available_width(), editor_height],
            egui::TextEdit::multiline(&mut self.canvas_content)
                .hint_text("ここに文章を書いてください..."),
        );

        ui.horizontal(|ui| {
            ui.label(format!("{} 文字", self.canvas_content.chars().count()));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let can_save = !self.canvas_content.trim().is_empty();
                if ui.add_enabled(can_save, egui::Button::new("保存")).clicked() {
                    self.save_canvas();
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shikibu_core::CHAT_REPLIES;

    fn test_app() -> (tempfile::TempDir, StudioApp) {
        let dir = tempfile::tempdir().unwrap();
        let outputs = OutputStore::open_path(dir.path().join("outputs")).unwrap();
        let config = CoreConfig {
            app_name: "Test".to_string(),
            port: 8001,
            storage_path: dir.path().display().to_string(),
            frontend_enabled: false,
        };
        (dir, StudioApp::new(config, outputs))
    }

    #[test]
    fn clamp_stays_inside_bounds() {
        assert_eq!(clamp_pane(10.0), PANE_MIN_PCT);
        assert_eq!(clamp_pane(95.0), PANE_MAX_PCT);
        assert_eq!(clamp_pane(50.0), 50.0);
        assert_eq!(clamp_pane(f32::NEG_INFINITY), PANE_MIN_PCT);
    }

    #[test]
    fn transcript_opens_with_the_greeting() {
        let (_dir, app) = test_app();
        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.messages[0].content, GREETING);
        assert_eq!(app.messages[0].role, Role::Assistant);
    }

    #[test]
    fn blank_message_is_ignored() {
        let (_dir, mut app) = test_app();
        app.input = "   ".to_string();
        app.send_message(Instant::now());
        assert_eq!(app.messages.len(), 1);
        assert!(app.pending_reply.is_none());
    }

    #[test]
    fn send_schedules_a_simulated_reply() {
        let (_dir, mut app) = test_app();
        let t0 = Instant::now();
        app.input = "書き出しに悩んでいます".to_string();
        app.send_message(t0);
        assert_eq!(app.messages.len(), 2);
        assert!(app.input.is_empty());

        // Not due yet.
        app.poll_timers(t0);
        assert_eq!(app.messages.len(), 2);

        app.poll_timers(t0 + REPLY_DELAY);
        assert_eq!(app.messages.len(), 3);
        assert_eq!(app.messages[2].role, Role::Assistant);
        assert!(CHAT_REPLIES.contains(&app.messages[2].content.as_str()));
        assert!(app.pending_reply.is_none());
    }

    #[test]
    fn saving_blank_canvas_is_a_no_op() {
        let (_dir, mut app) = test_app();
        app.canvas_content = "   ".to_string();
        app.save_canvas();
        assert!(app.outputs.list().unwrap().is_empty());
        assert!(app.status.is_none());
    }

    #[test]
    fn saving_appends_one_document_and_clears_the_editor() {
        let (_dir, mut app) = test_app();
        let before = Utc::now();
        app.canvas_title = "T".to_string();
        app.canvas_content = "Hello".to_string();
        app.save_canvas();

        let docs = app.outputs.list().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "T");
        assert_eq!(docs[0].content, "Hello");
        assert!(docs[0].timestamp >= before);
        assert!(app.canvas_title.is_empty());
        assert!(app.canvas_content.is_empty());
        assert_eq!(app.status.as_deref(), Some(SAVED_STATUS));
    }

    #[test]
    fn learning_runs_once_and_announces_completion() {
        let (_dir, mut app) = test_app();
        let t0 = Instant::now();
        app.start_learning(t0);
        assert!(app.is_learning());
        let first_deadline = app.learning_until;

        // Clicking again while running must not extend the animation.
        app.start_learning(t0 + Duration::from_secs(1));
        assert_eq!(app.learning_until, first_deadline);

        app.poll_timers(t0 + LEARN_DELAY);
        assert!(!app.is_learning());
        assert_eq!(app.status.as_deref(), Some(LEARN_DONE_STATUS));
    }
}
