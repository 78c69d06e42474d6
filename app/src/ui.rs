use crate::advice::{ADVICE_TITLE, advice_caption, advice_text};
use crate::app::MediPredictApp;

use eframe::egui::{self, Color32, RichText};

const HIGH_RISK_COLOR: Color32 = Color32::from_rgb(0xe7, 0x4c, 0x3c);
const LOW_RISK_COLOR: Color32 = Color32::from_rgb(0x2e, 0xcc, 0x71);

/// Draws the left-side panel: branding, navigation, appearance controls.
pub fn draw_side_panel(app: &mut MediPredictApp, ctx: &egui::Context) {
    egui::SidePanel::left("sidebar").show(ctx, |ui| {
        ui.heading("MediPredict");
        ui.separator();

        // Single view for now, so the nav button has nothing to switch to.
        let _ = ui.button("Prediction");

        ui.separator();
        ui.label("Appearance:");
        egui::global_theme_preference_buttons(ui);

        if let Some(session) = &app.session {
            ui.separator();
            ui.label(format!(
                "Held-out accuracy: {:.1}%",
                session.held_out_accuracy() * 100.0
            ));
        }
    });
}

/// Draws the entry form, the action buttons, and the result area.
pub fn draw_central_panel(app: &mut MediPredictApp, ctx: &egui::Context) {
    let mut do_predict = false;
    let mut do_reset = false;
    let mut open_advice = false;

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Patient Data Input");
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("patient_fields")
                .num_columns(2)
                .spacing([24.0, 8.0])
                .show(ui, |ui| {
                    let fields = app.schema.fields();
                    for (field, entry) in fields.iter().zip(app.form.entries_mut()) {
                        ui.label(format!("{} ({})", field.label, field.range_hint));
                        ui.add(egui::TextEdit::singleline(entry).hint_text(field.range_hint));
                        ui.end_row();
                    }
                });

            ui.add_space(16.0);
            ui.horizontal(|ui| {
                if ui.button("Generate Prediction").clicked() {
                    do_predict = true;
                }
                if ui.button("Reset Fields").clicked() {
                    do_reset = true;
                }
            });

            ui.add_space(16.0);
            if let Some(risk) = app.form.prediction() {
                let color = if risk.is_high() {
                    HIGH_RISK_COLOR
                } else {
                    LOW_RISK_COLOR
                };
                ui.label(
                    RichText::new(format!("Result: {risk}"))
                        .size(18.0)
                        .strong()
                        .color(color),
                );
                if ui.button(advice_caption(risk)).clicked() {
                    open_advice = true;
                }
            } else {
                ui.add_enabled(false, egui::Button::new("View Recommendations"));
            }
        });
    });

    // Events run after the panel closure so they get the whole app.
    if do_predict {
        app.predict_event();
    }
    if do_reset {
        app.reset_event();
    }
    if open_advice {
        app.advice_open = true;
    }
}

/// Draws the floating windows: the blocking error dialog and the
/// recommendations view.
pub fn draw_windows(app: &mut MediPredictApp, ctx: &egui::Context) {
    draw_error_dialog(app, ctx);
    draw_advice_window(app, ctx);
}

fn draw_error_dialog(app: &mut MediPredictApp, ctx: &egui::Context) {
    let Some(message) = app.dialog.clone() else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(&message);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        app.dialog = None;
    }
}

fn draw_advice_window(app: &mut MediPredictApp, ctx: &egui::Context) {
    if !app.advice_open {
        return;
    }
    let Some(risk) = app.form.prediction() else {
        app.advice_open = false;
        return;
    };

    let mut open = app.advice_open;
    egui::Window::new(ADVICE_TITLE)
        .open(&mut open)
        .default_size([460.0, 360.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.label(advice_text(risk));
            });
        });
    app.advice_open = open;
}
