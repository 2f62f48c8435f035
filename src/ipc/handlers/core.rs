use serde_json::json;

use crate::form::FormController;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::list::ListController;
use crate::store::{MemoryStore, RecordStore, RestStore, SqliteStore};

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "backend": state.backend
        }),
    )
}

/// Bind one of the three store backends for this session. Connection
/// parameters come from params, falling back to the environment so nothing
/// is hard-coded:
///   { "mode": "memory" }
///   { "mode": "sqlite", "path": <workspace dir> }   or ROSTERD_DB_PATH
///   { "mode": "rest", "baseUrl": <api base> }       or ROSTERD_API_URL
/// Re-selecting resets the form and roster controllers.
fn handle_backend_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(mode) = req.params.get("mode").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing params.mode", None);
    };

    let (store, summary): (Box<dyn RecordStore>, String) = match mode {
        "memory" => (Box::new(MemoryStore::new()), "memory".to_string()),
        "sqlite" => {
            let path = req
                .params
                .get("path")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .or_else(|| std::env::var("ROSTERD_DB_PATH").ok());
            let Some(path) = path else {
                return err(
                    &req.id,
                    "bad_params",
                    "sqlite mode needs params.path or ROSTERD_DB_PATH",
                    None,
                );
            };
            let summary = format!("sqlite:{}", path);
            (Box::new(SqliteStore::new(path)), summary)
        }
        "rest" => {
            let base_url = req
                .params
                .get("baseUrl")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .or_else(|| std::env::var("ROSTERD_API_URL").ok());
            let Some(base_url) = base_url else {
                return err(
                    &req.id,
                    "bad_params",
                    "rest mode needs params.baseUrl or ROSTERD_API_URL",
                    None,
                );
            };
            let summary = format!("rest:{}", base_url);
            (Box::new(RestStore::new(base_url)), summary)
        }
        other => {
            return err(
                &req.id,
                "bad_params",
                format!("unknown backend mode: {}", other),
                None,
            );
        }
    };

    tracing::info!(backend = %summary, "backend selected");
    state.store = Some(store);
    state.backend = Some(summary.clone());
    state.form = FormController::new();
    state.list = ListController::new();

    ok(&req.id, json!({ "backend": summary }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "backend.select" => Some(handle_backend_select(state, req)),
        _ => None,
    }
}
