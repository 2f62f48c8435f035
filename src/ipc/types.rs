use serde::Deserialize;

use crate::form::FormController;
use crate::list::ListController;
use crate::store::RecordStore;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Session state owned by the request loop and threaded through every
/// handler. `backend` is a short human-readable summary for `health`.
pub struct AppState {
    pub backend: Option<String>,
    pub store: Option<Box<dyn RecordStore>>,
    pub form: FormController,
    pub list: ListController,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            backend: None,
            store: None,
            form: FormController::new(),
            list: ListController::new(),
        }
    }
}
