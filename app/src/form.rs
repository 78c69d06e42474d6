use medipredict::session::Risk;

/// The entry form's state, kept separate from the widgets so it can be
/// exercised without a GUI: one text buffer per schema field plus the last
/// prediction, if any.
#[derive(Debug, Clone)]
pub struct FormState {
    entries: Vec<String>,
    prediction: Option<Risk>,
}

impl FormState {
    pub fn new(field_count: usize) -> Self {
        FormState {
            entries: vec![String::new(); field_count],
            prediction: None,
        }
    }

    pub fn entries_mut(&mut self) -> &mut [String] {
        &mut self.entries
    }

    /// The raw values in presentation order, for the prediction adapter.
    pub fn raw_values(&self) -> Vec<&str> {
        self.entries.iter().map(String::as_str).collect()
    }

    pub fn prediction(&self) -> Option<Risk> {
        self.prediction
    }

    pub fn set_prediction(&mut self, risk: Risk) {
        self.prediction = Some(risk);
    }

    /// Whether the recommendations affordance should be enabled.
    pub fn advice_available(&self) -> bool {
        self.prediction.is_some()
    }

    /// Clears every entry and drops the prediction, returning the form to
    /// its initial state.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.clear();
        }
        self.prediction = None;
    }
}
