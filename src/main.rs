mod api;
mod app;
mod dispatch;
mod session;
mod storage;
mod sync;
mod team;
mod ui;
mod utils;

use adw::prelude::*;
use adw::Application;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let app = Application::builder()
        .application_id("com.example.ParallelGtk")
        .build();
    app.connect_activate(|app| {
        if let Err(err) = crate::storage::init() {
            tracing::warn!("room cache unavailable: {err}");
        }
        crate::app::build_ui(app);
    });
    app.run();
}
