use eframe::egui::{self, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::{AppState, PageNav};

const ROW_HEIGHT: f32 = 44.0;

// ---------------------------------------------------------------------------
// Tweet table (bottom panel)
// ---------------------------------------------------------------------------

/// Render the current page of tweets and the pager controls.
pub fn tweet_table(ui: &mut Ui, state: &mut AppState) {
    // Owned copy so the pager buttons can mutate `state` afterwards.
    let view = state.table().clone();
    let mut nav = None;

    ui.horizontal(|ui: &mut Ui| {
        if ui
            .add_enabled(view.prev_enabled, egui::Button::new("◀ Prev"))
            .clicked()
        {
            nav = Some(PageNav::Prev);
        }
        ui.label(&view.label);
        if ui
            .add_enabled(view.next_enabled, egui::Button::new("Next ▶"))
            .clicked()
        {
            nav = Some(PageNav::Next);
        }
    });
    ui.separator();

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(Layout::top_down(egui::Align::Center))
        .column(Column::remainder())
        .min_scrolled_height(0.0)
        .header(24.0, |mut header| {
            header.col(|ui| {
                ui.strong("RawTweet");
            });
        })
        .body(|mut body| {
            if view.rows.is_empty() {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label(RichText::new("No data").weak());
                    });
                });
                return;
            }
            for tweet in &view.rows {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.add(egui::Label::new(&tweet.text).wrap());
                    });
                });
            }
        });

    if let Some(nav) = nav {
        state.on_page_nav(nav);
    }
}
