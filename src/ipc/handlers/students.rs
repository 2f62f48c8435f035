use serde_json::json;

use crate::ipc::error::{err, ok, store_err};
use crate::ipc::types::{AppState, Request};
use crate::store::RecordStore;
use crate::validate::validate;

/// The raw store surface. Create/update run the validator first; a failed
/// validation never mutates the store and reports every violated field in
/// `error.details`.
fn require_store<'a>(
    state: &'a mut AppState,
    req: &Request,
) -> Result<&'a mut Box<dyn RecordStore>, serde_json::Value> {
    state
        .store
        .as_mut()
        .ok_or_else(|| err(&req.id, "no_backend", "select a backend first", None))
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match store.list() {
        Ok(students) => ok(&req.id, json!({ "students": students })),
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let fields = match validate(&req.params) {
        Ok(f) => f,
        Err(errors) => {
            return err(
                &req.id,
                "validation_failed",
                "student record failed validation",
                Some(json!(errors)),
            )
        }
    };
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match store.create(&fields) {
        Ok(student) => ok(&req.id, json!({ "student": student })),
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(id) = req.params.get("id").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing id", None);
    };
    let id = id.to_string();
    // The id key rides along with the fields; the validator ignores it.
    let fields = match validate(&req.params) {
        Ok(f) => f,
        Err(errors) => {
            return err(
                &req.id,
                "validation_failed",
                "student record failed validation",
                Some(json!(errors)),
            )
        }
    };
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match store.update(&id, &fields) {
        Ok(student) => ok(&req.id, json!({ "student": student })),
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(id) = req.params.get("id").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing id", None);
    };
    let id = id.to_string();
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match store.delete(&id) {
        Ok(()) => ok(&req.id, json!({ "deletedId": id })),
        Err(e) => store_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_list(state, req)),
        "students.create" => Some(handle_create(state, req)),
        "students.update" => Some(handle_update(state, req)),
        "students.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
