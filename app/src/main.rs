mod advice;
mod app;
mod form;
mod ui;

use app::MediPredictApp;

fn main() -> eframe::Result<()> {
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Diabetes Prediction System",
        native_options,
        Box::new(|_cc| Ok(Box::new(MediPredictApp::default()))),
    )
}
