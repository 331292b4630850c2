use eframe::egui::{self, Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::selection::Region;
use crate::state::{AppState, Phase};

// Fixed marker style: size 8, #333333 at 80% opacity.
const MARKER_RADIUS: f32 = 4.0;
const MARKER_COLOR: Color32 = Color32::from_rgba_premultiplied(41, 41, 41, 204);
const DIMMED_COLOR: Color32 = Color32::from_rgba_premultiplied(10, 10, 10, 51);
const REGION_COLOR: Color32 = Color32::from_rgb(31, 119, 180);

// ---------------------------------------------------------------------------
// Drag interaction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    Lasso,
    Box,
    Pan,
}

impl DragMode {
    pub const ALL: [DragMode; 3] = [DragMode::Lasso, DragMode::Box, DragMode::Pan];

    pub fn label(&self) -> &'static str {
        match self {
            DragMode::Lasso => "Lasso select",
            DragMode::Box => "Box select",
            DragMode::Pan => "Pan",
        }
    }

    pub fn selects(&self) -> bool {
        !matches!(self, DragMode::Pan)
    }
}

/// The region currently being drawn, in plot coordinates.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    pub mode: DragMode,
    path: Vec<[f64; 2]>,
}

impl ChartInteraction {
    pub fn begin(&mut self) {
        self.path.clear();
    }

    pub fn extend(&mut self, p: [f64; 2]) {
        if self.path.last() != Some(&p) {
            self.path.push(p);
        }
    }

    pub fn cancel(&mut self) {
        self.path.clear();
    }

    pub fn is_drawing(&self) -> bool {
        !self.path.is_empty()
    }

    /// Close the drawn shape. `None` when nothing was drawn.
    pub fn finish(&mut self) -> Option<Region> {
        let path = std::mem::take(&mut self.path);
        let (first, last) = (*path.first()?, *path.last()?);
        match self.mode {
            DragMode::Lasso => Some(Region::Lasso(path)),
            DragMode::Box => Some(Region::Box { a: first, b: last }),
            DragMode::Pan => None,
        }
    }

    /// Outline of the shape in progress, closed back to its start.
    fn outline(&self) -> Vec<[f64; 2]> {
        let (Some(&a), Some(&b)) = (self.path.first(), self.path.last()) else {
            return Vec::new();
        };
        match self.mode {
            DragMode::Box => vec![a, [b[0], a[1]], b, [a[0], b[1]], a],
            _ => {
                let mut pts = self.path.clone();
                pts.push(a);
                pts
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the projection scatter plot and turn drawn regions into
/// selection events.
pub fn scatter_plot(ui: &mut Ui, state: &mut AppState, interaction: &mut ChartInteraction) {
    match state.phase {
        Phase::Idle => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a dataset to explore tweets  (File → Open…)");
            });
            return;
        }
        Phase::Loading => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.spinner();
            });
            return;
        }
        Phase::Ready => {}
    }

    ui.horizontal(|ui: &mut Ui| {
        for mode in DragMode::ALL {
            if ui
                .selectable_value(&mut interaction.mode, mode, mode.label())
                .clicked()
            {
                interaction.cancel();
            }
        }
    });

    let selecting = interaction.mode.selects();
    let chart = state.chart();
    let selection = state.selection();

    let plot_response = Plot::new("scatter_plot")
        .show_axes(false)
        .show_grid(true)
        .show_x(false)
        .show_y(false)
        .allow_drag(!selecting)
        .allow_boxed_zoom(false)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let (mut normal, mut dimmed) = (Vec::new(), Vec::new());
            for (id, p) in chart.points() {
                if !(p[0].is_finite() && p[1].is_finite()) {
                    continue;
                }
                if selection.is_empty() || selection.contains(id) {
                    normal.push(p);
                } else {
                    dimmed.push(p);
                }
            }

            if !dimmed.is_empty() {
                plot_ui.points(
                    Points::new(PlotPoints::from(dimmed))
                        .radius(MARKER_RADIUS)
                        .color(DIMMED_COLOR),
                );
            }
            plot_ui.points(
                Points::new(PlotPoints::from(normal))
                    .radius(MARKER_RADIUS)
                    .color(MARKER_COLOR),
            );

            if interaction.is_drawing() {
                plot_ui.line(
                    Line::new(PlotPoints::from(interaction.outline()))
                        .color(REGION_COLOR)
                        .width(1.5),
                );
            }
        });

    if !selecting {
        return;
    }

    let response = &plot_response.response;
    if response.drag_started() {
        interaction.begin();
    }
    if response.dragged() || response.drag_stopped() {
        if let Some(pos) = response.interact_pointer_pos() {
            let p = plot_response.transform.value_from_position(pos);
            interaction.extend([p.x, p.y]);
        }
    }
    if response.drag_stopped() {
        if let Some(region) = interaction.finish() {
            let ids = region.select(state.chart());
            state.on_selection_event(&ids);
        }
    } else if response.clicked() {
        state.on_selection_event(&[]);
    }
    if interaction.is_drawing() {
        ui.ctx().request_repaint();
    }
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
    }
}
