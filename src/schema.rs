use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One entry field presented to the user.
///
/// The key doubles as the dataset column name this field feeds; range hints
/// are shown to the user but never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub range_hint: &'static str,
}

/// Errors raised when the entry fields and the dataset's feature columns are
/// not a bijection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A field key has no matching dataset column
    MissingColumn(String),
    /// A dataset column has no matching field
    UnknownColumn(String),
    /// Two fields share the same key
    DuplicateField(String),
    /// Field count and feature-column count differ
    CountMismatch { fields: usize, columns: usize },
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::MissingColumn(name) => {
                write!(f, "Entry field '{name}' has no matching dataset column")
            }
            SchemaError::UnknownColumn(name) => {
                write!(f, "Dataset column '{name}' has no matching entry field")
            }
            SchemaError::DuplicateField(name) => {
                write!(f, "Entry field '{name}' is defined more than once")
            }
            SchemaError::CountMismatch { fields, columns } => write!(
                f,
                "Schema has {fields} entry fields but the dataset has {columns} feature columns"
            ),
        }
    }
}

impl Error for SchemaError {}

/// The ordered list of entry fields shown on the form.
///
/// Presentation order is only that: presentation. Feature vectors handed to
/// the classifier are assembled through `column_mapping`, which matches
/// fields to training columns by name, never by position.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    fields: Vec<Field>,
}

impl FieldSchema {
    pub fn new(fields: Vec<Field>) -> Self {
        FieldSchema { fields }
    }

    /// The eight clinical measurements of the diabetes dataset, in the order
    /// the form presents them. Keys are the dataset's column names.
    pub fn clinical() -> Self {
        FieldSchema::new(vec![
            Field {
                key: "Pregnancies",
                label: "Pregnancies",
                range_hint: "0 - 20",
            },
            Field {
                key: "Glucose",
                label: "Glucose",
                range_hint: "50 - 200 mg/dL",
            },
            Field {
                key: "BloodPressure",
                label: "Blood Pressure",
                range_hint: "40 - 140 mm Hg",
            },
            Field {
                key: "SkinThickness",
                label: "Skin Thickness",
                range_hint: "5 - 100 mm",
            },
            Field {
                key: "Insulin",
                label: "Insulin",
                range_hint: "0 - 900 mu U/ml",
            },
            Field {
                key: "BMI",
                label: "BMI",
                range_hint: "10 - 60",
            },
            Field {
                key: "DiabetesPedigreeFunction",
                label: "Diabetes Pedigree",
                range_hint: "0.0 - 2.5",
            },
            Field {
                key: "Age",
                label: "Age",
                range_hint: "21 - 100",
            },
        ])
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Verifies that field keys and feature columns are a bijection and
    /// returns, for each training column, the index of the field feeding it.
    ///
    /// # Errors
    ///
    /// Returns a `SchemaError` describing the first duplicated, unknown, or
    /// unmatched name found.
    pub fn column_mapping(&self, feature_names: &[String]) -> Result<Vec<usize>, SchemaError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.key) {
                return Err(SchemaError::DuplicateField(field.key.to_string()));
            }
        }

        if self.fields.len() != feature_names.len() {
            return Err(SchemaError::CountMismatch {
                fields: self.fields.len(),
                columns: feature_names.len(),
            });
        }

        let mut mapping = Vec::with_capacity(feature_names.len());
        let mut matched = vec![false; self.fields.len()];
        for column in feature_names {
            let index = self
                .fields
                .iter()
                .position(|field| field.key == column)
                .ok_or_else(|| SchemaError::UnknownColumn(column.clone()))?;
            matched[index] = true;
            mapping.push(index);
        }

        // Counts match and every column found a distinct field, so this can
        // only fire if the dataset itself repeated a column name.
        if let Some(index) = matched.iter().position(|&m| !m) {
            return Err(SchemaError::MissingColumn(self.fields[index].key.to_string()));
        }

        Ok(mapping)
    }
}
