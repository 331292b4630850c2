use eframe::egui;
use tweetscope::app::TweetscopeApp;
use tweetscope::config::DashboardConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_env();
    log::debug!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tweetscope – Sentiment Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(TweetscopeApp::new(config)))),
    )
}
