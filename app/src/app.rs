use crate::form::FormState;
use crate::ui;

use eframe::egui;
use eframe::{App, Frame};
use medipredict::DATA_FILEPATH;
use medipredict::schema::FieldSchema;
use medipredict::session::{Session, TrainConfig};

/// The main application struct.
///
/// Training happens synchronously in `default()`, before the first frame; a
/// failure leaves the window open but predictions disabled, and the error is
/// re-shown whenever the user tries to predict anyway.
pub struct MediPredictApp {
    /// The trained session, if startup training succeeded.
    pub session: Option<Session>,
    /// Why training failed, if it did.
    pub startup_error: Option<String>,
    /// The entry fields, kept outside the session so the form can still be
    /// drawn when training failed.
    pub schema: FieldSchema,
    /// Text buffers plus the last prediction.
    pub form: FormState,
    /// Message for the blocking error dialog, if one is up.
    pub dialog: Option<String>,
    /// Whether the recommendations window is open.
    pub advice_open: bool,
}

impl Default for MediPredictApp {
    fn default() -> Self {
        let schema = FieldSchema::clinical();
        let field_count = schema.len();

        let (session, startup_error) =
            match Session::train(DATA_FILEPATH, schema.clone(), &TrainConfig::default()) {
                Ok(session) => (Some(session), None),
                Err(err) => (None, Some(format!("Failed to load/train model: {err}"))),
            };

        let dialog = startup_error.clone();

        MediPredictApp {
            session,
            startup_error,
            schema,
            form: FormState::new(field_count),
            dialog,
            advice_open: false,
        }
    }
}

impl App for MediPredictApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ui::draw_side_panel(self, ctx);
        ui::draw_central_panel(self, ctx);
        ui::draw_windows(self, ctx);
    }
}

impl MediPredictApp {
    /// Runs validation and the classifier on the current form contents.
    pub fn predict_event(&mut self) {
        let Some(session) = &self.session else {
            let message = self
                .startup_error
                .clone()
                .unwrap_or_else(|| "Model not loaded.".to_string());
            self.dialog = Some(message);
            return;
        };

        match session.predict(&self.form.raw_values()) {
            Ok(risk) => {
                self.form.set_prediction(risk);
                self.advice_open = false;
            }
            Err(err) => self.dialog = Some(err.to_string()),
        }
    }

    /// Returns the form and result area to their initial state.
    pub fn reset_event(&mut self) {
        self.form.reset();
        self.advice_open = false;
    }
}
