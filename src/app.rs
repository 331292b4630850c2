use std::time::Duration;

use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::{AppState, Phase};
use crate::ui::panels::{self, ControlsState};
use crate::ui::plot::{self, ChartInteraction};
use crate::ui::table;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TweetscopeApp {
    pub state: AppState,
    /// Slider positions while they are being dragged.
    pub controls: ControlsState,
    /// Drag mode and the region being drawn.
    pub interaction: ChartInteraction,
}

impl TweetscopeApp {
    /// Build the app and kick off the startup load.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = AppState::new(config.columns, config.page_size);
        state.begin_loading(config.data_path);
        Self {
            controls: ControlsState::from_criteria(&state.criteria),
            state,
            interaction: ChartInteraction::default(),
        }
    }
}

impl eframe::App for TweetscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.poll_loading() {
            self.controls = ControlsState::from_criteria(&self.state.criteria);
            self.interaction.cancel();
        }
        if self.state.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Filter controls ----
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            panels::controls(ui, &mut self.state, &mut self.controls);
        });

        // ---- Bottom panel: tweet table ----
        if self.state.phase == Phase::Ready {
            egui::TopBottomPanel::bottom("tweet_table")
                .default_height(320.0)
                .resizable(true)
                .show(ctx, |ui| {
                    table::tweet_table(ui, &mut self.state);
                });
        }

        // ---- Central panel: scatter plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::scatter_plot(ui, &mut self.state, &mut self.interaction);
        });
    }
}
