use serde_json::{json, Value};

use crate::record::StudentRecord;
use crate::store::{RecordStore, StoreError};
use crate::validate::{validate, FieldErrors};

/// Create has no identifier bound; Edit is pinned to an existing record's id.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit(String),
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validated and persisted. `created` distinguishes POST-style creates
    /// (form fields were cleared) from PUT-style edits (fields retained).
    Saved {
        record: StudentRecord,
        created: bool,
    },
    /// Field-level failures; nothing touched the store.
    Invalid(FieldErrors),
    /// Validation passed but the store refused; form state is unchanged.
    Failed(StoreError),
}

/// Orchestrates one create-or-edit interaction: holds the raw field values
/// as last entered, runs the validator on submit, and routes the validated
/// draft to `create` or `update` depending on the bound mode.
#[derive(Debug)]
pub struct FormController {
    mode: FormMode,
    fields: Value,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            fields: Self::empty_fields(),
        }
    }

    /// The blank-form defaults the original UI starts from.
    pub fn empty_fields() -> Value {
        json!({
            "firstName": "",
            "lastName": "",
            "city": "",
            "email": "",
            "phone": "",
            "bio": "",
            "tenthMarks": 0,
            "twelfthMarks": 0,
            "degreeType": "",
            "yearsOfStudy": 1
        })
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn fields(&self) -> &Value {
        &self.fields
    }

    /// Reset to a blank create form.
    pub fn open_create(&mut self) {
        self.mode = FormMode::Create;
        self.fields = Self::empty_fields();
    }

    /// Bind an existing record for editing; the form starts populated with
    /// its current values.
    pub fn open_edit(&mut self, record: &StudentRecord) {
        self.mode = FormMode::Edit(record.id.clone());
        self.fields = serde_json::to_value(&record.fields).unwrap_or_else(|_| Value::Null);
    }

    /// Validate and persist the candidate fields. On validation failure the
    /// submitted values stay in the form and no store call is made. On a
    /// successful create the form clears back to its defaults; a successful
    /// edit leaves it populated. Store failures leave everything as
    /// submitted so the user can retry.
    pub fn submit(&mut self, store: &mut dyn RecordStore, fields: Value) -> SubmitOutcome {
        self.fields = fields;

        let draft = match validate(&self.fields) {
            Ok(d) => d,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        let result = match &self.mode {
            FormMode::Create => store.create(&draft).map(|r| (r, true)),
            FormMode::Edit(id) => store.update(id, &draft).map(|r| (r, false)),
        };

        match result {
            Ok((record, created)) => {
                if created {
                    self.fields = Self::empty_fields();
                }
                SubmitOutcome::Saved { record, created }
            }
            Err(e) => SubmitOutcome::Failed(e),
        }
    }
}
