use std::path::Path;

use anyhow::Result;
use eframe::egui::{self, Color32, RichText};

use convo_eval_common::summary::{BinarySummary, LikertSummary};
use convo_eval_common::{
    format_stat, Action, EvalMode, Judgment, Outcome, Rating, Session, Summary, Tone,
    DEFAULT_BACKGROUND,
};

use crate::io::{
    default_csv_name, default_json_name, default_output_path, load_dataset, load_evaluations,
    save_evaluations, save_results,
};
use crate::model::{AppState, ViewState, Workspace};

pub struct DesktopApp {
    state: AppState,
    view: ViewState,
    status: String,
    export_status: String,
}

impl Default for DesktopApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
            view: ViewState::default(),
            status: "Open a CSV to start".to_string(),
            export_status: String::new(),
        }
    }
}

impl DesktopApp {
    fn open_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .pick_file()
        {
            match self.load_from_path(&path) {
                Ok(_) => self.status = format!("Loaded {}", path.display()),
                Err(err) => self.status = format!("Load failed: {err:#}"),
            }
        }
    }

    fn load_from_path(&mut self, path: &Path) -> Result<()> {
        let dataset = load_dataset(path)?;
        tracing::info!(path = %path.display(), rows = dataset.len(), "dataset opened");
        self.state.workspace = Some(Workspace::new(self.state.mode, dataset));
        self.state.source_path = Some(path.to_path_buf());
        self.view.reset();
        self.export_status.clear();
        Ok(())
    }

    fn resume_json(&mut self) {
        let Some(workspace) = self.state.workspace.take() else {
            self.status = "No CSV loaded".to_string();
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        else {
            self.state.workspace = Some(workspace);
            return;
        };

        let result = match workspace {
            Workspace::Binary(ref s) => resume::<bool>(&path, s).map(|(s, n)| (Workspace::Binary(s), n)),
            Workspace::Likert(ref s) => resume::<Rating>(&path, s).map(|(s, n)| (Workspace::Likert(s), n)),
        };
        match result {
            Ok((resumed, unknown)) => {
                self.state.workspace = Some(resumed);
                self.view.reset();
                self.status = if unknown == 0 {
                    format!("Resumed from {}", path.display())
                } else {
                    format!("Resumed from {} ({} unknown turn ids ignored)", path.display(), unknown)
                };
            }
            Err(err) => {
                self.state.workspace = Some(workspace);
                self.status = format!("Resume failed: {err:#}");
            }
        }
    }

    fn save_json(&mut self) {
        let source = self.state.source_path.clone();
        let outcome = match &self.state.workspace {
            Some(Workspace::Binary(s)) => save_json_dialog(source.as_deref(), s),
            Some(Workspace::Likert(s)) => save_json_dialog(source.as_deref(), s),
            None => return,
        };
        if let Some(message) = outcome {
            self.export_status = message;
        }
    }

    fn export_csv(&mut self) {
        let source = self.state.source_path.clone();
        let outcome = match &self.state.workspace {
            Some(Workspace::Binary(s)) => export_csv_dialog(source.as_deref(), s),
            Some(Workspace::Likert(s)) => export_csv_dialog(source.as_deref(), s),
            None => return,
        };
        if let Some(message) = outcome {
            self.export_status = message;
        }
    }

    fn render_menu(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open CSV").clicked() {
                    self.open_csv();
                    ui.close_menu();
                }
                let loaded = self.state.workspace.is_some();
                if ui.add_enabled(loaded, egui::Button::new("Resume from JSON")).clicked() {
                    self.resume_json();
                    ui.close_menu();
                }
                let has_evaluations = self
                    .state
                    .workspace
                    .as_ref()
                    .is_some_and(Workspace::has_evaluations);
                if ui
                    .add_enabled(has_evaluations, egui::Button::new("💾 Save Evaluations"))
                    .clicked()
                {
                    self.save_json();
                    ui.close_menu();
                }
                if ui
                    .add_enabled(has_evaluations, egui::Button::new("📥 Download Results as CSV"))
                    .clicked()
                {
                    self.export_csv();
                    ui.close_menu();
                }
                ui.separator();
                if ui.add_enabled(loaded, egui::Button::new("Reset Session")).clicked() {
                    if let Some(workspace) = self.state.workspace.as_mut() {
                        workspace.reinitialize();
                        self.view.reset();
                        self.export_status.clear();
                        self.status = "Session reset".to_string();
                    }
                    ui.close_menu();
                }
            });

            ui.menu_button("Mode", |ui| {
                ui.label("Applies to the next CSV opened");
                ui.radio_value(&mut self.state.mode, EvalMode::Binary, "True / False");
                ui.radio_value(&mut self.state.mode, EvalMode::Likert, "Likert 1-5");
                ui.separator();
                ui.checkbox(&mut self.state.allow_clear_binary, "Allow clearing True/False");
                if let Some(mode) = self.state.workspace.as_ref().map(Workspace::mode) {
                    if mode != self.state.mode && ui.button("Reopen with this mode").clicked() {
                        if let Some(path) = self.state.source_path.clone() {
                            if let Err(err) = self.load_from_path(&path) {
                                self.status = format!("Reload failed: {err:#}");
                            }
                        }
                        ui.close_menu();
                    }
                }
            });

            ui.separator();
            if !self.export_status.is_empty() {
                ui.label(RichText::new(&self.export_status).color(Color32::from_rgb(246, 196, 69)));
            }
            if !self.status.is_empty() {
                ui.label(RichText::new(&self.status).color(Color32::from_gray(170)));
            }
        });
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            self.render_menu(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let mode = self
                    .state
                    .workspace
                    .as_ref()
                    .map_or(self.state.mode, Workspace::mode);
                ui.heading(format!("💬 {}", mode.title()));
                ui.collapsing("Background", |ui| {
                    ui.label(DEFAULT_BACKGROUND);
                });
                if mode == EvalMode::Likert {
                    ui.collapsing("📋 Rating Scale Guide", render_rating_guide);
                }
                ui.separator();

                let show_clear = mode.surfaces_clear() || self.state.allow_clear_binary;
                match &mut self.state.workspace {
                    None => {
                        ui.label("Please open your CSV file (File → Open CSV).");
                    }
                    Some(Workspace::Binary(session)) => {
                        self.view.sync(session);
                        let actions = render_page(ui, session, &mut self.view, show_clear, |_, _| None);
                        apply_all(session, actions);
                    }
                    Some(Workspace::Likert(session)) => {
                        if self.view.sync(session) {
                            self.view.slider_value = session.current_judgment().map_or(3, |r| r.value());
                        }
                        let actions = render_page(ui, session, &mut self.view, show_clear, render_slider);
                        apply_all(session, actions);
                    }
                }
            });
        });
    }
}

fn resume<J: Judgment>(path: &Path, current: &Session<J>) -> Result<(Session<J>, usize)> {
    let store = load_evaluations::<J>(path)?;
    let (session, unknown) = Session::with_evaluations(current.dataset().clone(), store);
    Ok((session, unknown.len()))
}

fn save_json_dialog<J: Judgment>(source: Option<&Path>, session: &Session<J>) -> Option<String> {
    let default_path = default_output_path(source, &default_json_name::<J>());
    let path = pick_save_path(&default_path, "JSON", "json")?;
    Some(match save_evaluations(&path, session.evaluations()) {
        Ok(_) => format!("Evaluations saved to {}", path.display()),
        Err(err) => format!("Save failed: {err:#}"),
    })
}

fn export_csv_dialog<J: Judgment>(source: Option<&Path>, session: &Session<J>) -> Option<String> {
    let default_path = default_output_path(source, &default_csv_name::<J>());
    let path = pick_save_path(&default_path, "CSV", "csv")?;
    Some(match save_results(&path, session) {
        Ok(_) => format!("Results exported to {}", path.display()),
        Err(err) => format!("Export failed: {err:#}"),
    })
}

fn pick_save_path(default_path: &Path, filter: &str, extension: &str) -> Option<std::path::PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .add_filter(filter, &[extension])
        .set_file_name(
            default_path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("evaluations"),
        );
    if let Some(dir) = default_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        dialog = dialog.set_directory(dir);
    }
    dialog.save_file()
}

fn apply_all<J: Judgment>(session: &mut Session<J>, actions: Vec<Action<J>>) {
    for action in actions {
        if session.apply(action) == Outcome::NoneRemaining {
            tracing::info!("no unevaluated turns remain");
        }
    }
}

/// 1画面分を描画し、押された操作を返す
///
/// `extra_controls` は評価ボタンの下に追加の入力欄を出す（リッカートのスライダー）。
fn render_page<J, F>(
    ui: &mut egui::Ui,
    session: &Session<J>,
    view: &mut ViewState,
    show_clear: bool,
    mut extra_controls: F,
) -> Vec<Action<J>>
where
    J: Judgment,
    F: FnMut(&mut egui::Ui, &mut ViewState) -> Option<J>,
{
    let mut actions = Vec::new();
    let total = session.dataset().len();
    let nav = session.navigator();

    render_summary(ui, &session.summary());
    ui.separator();

    ui.horizontal(|ui| {
        if ui.add_enabled(!nav.is_first(), egui::Button::new("⬅️ Previous")).clicked() {
            actions.push(Action::Previous);
        }
        ui.label(RichText::new(format!("Current Turn: {} / {}", session.current_index() + 1, total)).strong());
        if ui.add_enabled(!nav.is_last(), egui::Button::new("Next ➡️")).clicked() {
            actions.push(Action::Next);
        }
        ui.separator();
        ui.label("Jump to turn:");
        ui.add(egui::DragValue::new(&mut view.goto_turn).clamp_range(1..=total));
        if ui.button("Go to Turn").clicked() {
            actions.push(Action::GoTo(view.goto_turn.saturating_sub(1)));
        }
    });

    let row = session.current_row();
    ui.add_space(8.0);
    ui.heading(format!("Turn {} of {}", row.turn_id, total));
    ui.group(|ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new("🗣️ Conversation").strong());
        ui.label(format!("Person A: {}", row.question));
        ui.label(format!("Person B: {}", row.answer));
    });
    ui.separator();

    ui.label(RichText::new("Evaluation").strong());
    ui.label(J::MODE.question());
    let current = session.current_judgment();
    ui.horizontal(|ui| {
        for choice in J::choices() {
            let button = egui::Button::new(RichText::new(choice.choice_label()).size(16.0))
                .selected(current == Some(choice))
                .min_size(egui::vec2(90.0, 36.0));
            if ui.add(button).clicked() {
                actions.push(Action::Judge(choice));
            }
        }
    });
    if let Some(value) = extra_controls(ui, view) {
        actions.push(Action::Judge(value));
    }

    let status = match current {
        Some(value) => RichText::new(format!("Current evaluation: {}", value.status_label()))
            .color(tone_color(value.tone())),
        None => RichText::new("Current evaluation: Not evaluated yet").color(tone_color(Tone::Unset)),
    };
    ui.label(status);

    ui.horizontal(|ui| {
        let remaining = session.unevaluated_count();
        if remaining > 0
            && ui
                .button(format!("🚀 Jump to Next Unrated Turn ({} remaining)", remaining))
                .clicked()
        {
            actions.push(Action::JumpToNextUnevaluated);
        }
        if show_clear && current.is_some() && ui.button("🗑️ Clear Rating").clicked() {
            actions.push(Action::Clear);
        }
    });
    ui.separator();

    ui.label("📝 Notes (optional):");
    let response = ui.add(
        egui::TextEdit::multiline(&mut view.note_draft)
            .desired_rows(4)
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        actions.push(Action::SetNote(view.note_draft.clone()));
    }

    actions
}

fn render_slider(ui: &mut egui::Ui, view: &mut ViewState) -> Option<Rating> {
    let mut picked = None;
    ui.horizontal(|ui| {
        ui.label("Or use slider:");
        ui.add(egui::Slider::new(&mut view.slider_value, Rating::MIN..=Rating::MAX).text("Rating"));
        if ui.button("Set Rating from Slider").clicked() {
            picked = Rating::new(view.slider_value);
        }
    });
    picked
}

fn render_rating_guide(ui: &mut egui::Ui) {
    for rating in Rating::all() {
        ui.label(format!(
            "{} {} - {} ({})",
            rating,
            rating.emoji(),
            rating.label(),
            rating.description()
        ));
    }
}

fn render_summary(ui: &mut egui::Ui, summary: &Summary) {
    ui.label(RichText::new("📊 Evaluation Summary").strong().size(16.0));
    match summary {
        Summary::Binary(s) => render_binary_summary(ui, s),
        Summary::Likert(s) => render_likert_summary(ui, s),
    }
    ui.add(egui::ProgressBar::new(summary.progress() as f32).text(summary.progress_text()));
}

fn render_binary_summary(ui: &mut egui::Ui, s: &BinarySummary) {
    ui.columns(4, |cols| {
        metric(&mut cols[0], "Total Turns", s.total.to_string());
        metric(&mut cols[1], "Evaluated", s.evaluated.to_string());
        metric(&mut cols[2], "True", format!("{} ({:.1}%)", s.true_count, s.true_percentage()));
        metric(&mut cols[3], "False", format!("{} ({:.1}%)", s.false_count, s.false_percentage()));
    });
}

fn render_likert_summary(ui: &mut egui::Ui, s: &LikertSummary) {
    ui.columns(5, |cols| {
        metric(&mut cols[0], "Total Turns", s.total.to_string());
        metric(&mut cols[1], "Evaluated", s.evaluated.to_string());
        metric(&mut cols[2], "Mean Rating", format_stat(s.mean(), 2));
        metric(&mut cols[3], "Std Dev", format_stat(s.std_dev(), 2));
        metric(&mut cols[4], "Median", format_stat(s.median(), 1));
    });

    if s.evaluated == 0 {
        return;
    }
    ui.label(RichText::new("Rating Distribution:").strong());
    for rating in Rating::all() {
        let share = s.rating_percentage(rating);
        ui.horizontal(|ui| {
            ui.label(format!("Rating {} {}: {} ({:.1}%)", rating, rating.emoji(), s.count(rating), share));
            ui.add(egui::ProgressBar::new((share / 100.0) as f32).desired_width(200.0));
        });
    }
}

fn metric(ui: &mut egui::Ui, label: &str, value: String) {
    ui.label(RichText::new(label).color(Color32::from_gray(170)).size(12.0));
    ui.label(RichText::new(value).size(20.0).strong());
}

fn tone_color(tone: Tone) -> Color32 {
    match tone {
        Tone::Positive => Color32::from_rgb(80, 200, 120),
        Tone::Neutral => Color32::from_rgb(240, 160, 60),
        Tone::Negative => Color32::from_rgb(230, 80, 80),
        Tone::Unset => Color32::from_gray(150),
    }
}
