//! egui widgets. Each function draws one area and forwards user actions to
//! the [`AppState`](crate::state::AppState) reactions.

pub mod panels;
pub mod plot;
pub mod table;
