//! # Tweetscope
//!
//! An egui dashboard for exploring a fixed dataset of pre-scored tweets:
//! filter by month and two score ranges, draw a lasso or box on the 2D
//! projection, and page through the text of the selected tweets.
//!
//! The pipeline is split into pure pieces so it can be tested without a
//! window:
//!
//! - [`data`]: loading, text cleaning, filtering
//! - [`selection`]: selected ids and region geometry
//! - [`paginate`]: fixed-size pages
//! - [`state`]: the coordinator reacting to control, selection and page events
//! - [`ui`] / [`app`]: the eframe shell wiring widgets to those reactions

pub mod app;
pub mod config;
pub mod data;
pub mod paginate;
pub mod selection;
pub mod state;
pub mod ui;
