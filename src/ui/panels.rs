use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::data::filter::{
    FilterCriteria, SENTIMENT_DOMAIN, SLIDER_STEP, SUBJECTIVITY_DOMAIN, ScoreRange,
};
use crate::state::{AppState, ControlChange, Phase};

// ---------------------------------------------------------------------------
// Slider state between drag start and release
// ---------------------------------------------------------------------------

/// Handle positions of one two-handle slider. Moves freely while dragging;
/// only a release commits it to the filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeEdit {
    pub lo: f64,
    pub hi: f64,
}

impl From<ScoreRange> for RangeEdit {
    fn from(r: ScoreRange) -> Self {
        Self { lo: r.min(), hi: r.max() }
    }
}

impl RangeEdit {
    pub fn committed(&self) -> ScoreRange {
        ScoreRange::new(self.lo, self.hi).snapped(SLIDER_STEP)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlsState {
    pub sentiment: RangeEdit,
    pub subjectivity: RangeEdit,
}

impl ControlsState {
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        Self {
            sentiment: criteria.sentiment.into(),
            subjectivity: criteria.subjectivity.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter controls
// ---------------------------------------------------------------------------

/// Render the category selector and the two score sliders.
pub fn controls(ui: &mut Ui, state: &mut AppState, edits: &mut ControlsState) {
    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let categories = dataset.categories().to_vec();

    let mut changes = Vec::new();

    ui.horizontal(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.strong("Month");
            let current = state.criteria.category.clone();
            egui::ComboBox::from_id_salt("category")
                .selected_text(&current)
                .width(150.0)
                .show_ui(ui, |ui: &mut Ui| {
                    for cat in &categories {
                        if ui.selectable_label(current == *cat, cat).clicked() {
                            changes.push(ControlChange::Category(cat.clone()));
                        }
                    }
                });
        });
        ui.add_space(30.0);

        if let Some(r) = range_slider(
            ui,
            "Sentiment Score",
            &mut edits.sentiment,
            SENTIMENT_DOMAIN,
        ) {
            changes.push(ControlChange::Sentiment(r));
        }
        ui.add_space(30.0);

        if let Some(r) = range_slider(
            ui,
            "Subjectivity Score",
            &mut edits.subjectivity,
            SUBJECTIVITY_DOMAIN,
        ) {
            changes.push(ControlChange::Subjectivity(r));
        }
    });

    for change in changes {
        state.on_control_change(change);
    }
}

/// Two sliders acting as the lower and upper handle. Returns the committed
/// range when a handle is released or moved without dragging.
fn range_slider(
    ui: &mut Ui,
    label: &str,
    edit: &mut RangeEdit,
    domain: ScoreRange,
) -> Option<ScoreRange> {
    ui.vertical(|ui: &mut Ui| {
        ui.strong(label);
        let lo = ui.add(
            Slider::new(&mut edit.lo, domain.min()..=edit.hi)
                .step_by(SLIDER_STEP)
                .fixed_decimals(2)
                .text("min"),
        );
        let hi = ui.add(
            Slider::new(&mut edit.hi, edit.lo..=domain.max())
                .step_by(SLIDER_STEP)
                .fixed_decimals(2)
                .text("max"),
        );
        ui.label(format!("{:.2} – {:.2}", edit.lo, edit.hi));

        let committed = [&lo, &hi]
            .iter()
            .any(|r| r.drag_stopped() || (r.changed() && !r.dragged()));
        committed.then(|| edit.committed())
    })
    .inner
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        match state.phase {
            Phase::Idle => {
                ui.label("No dataset");
            }
            Phase::Loading => {
                if state.is_loading() {
                    ui.spinner();
                }
                if let Some(path) = &state.source {
                    ui.label(format!("Loading {}…", path.display()));
                }
            }
            Phase::Ready => {
                if let Some(ds) = &state.dataset {
                    ui.label(format!(
                        "{} tweets loaded, {} in filter, {} selected",
                        ds.len(),
                        state.chart().len(),
                        state.selection().current().len()
                    ));
                }
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open tweet dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.begin_loading(path);
    }
}
