use serde_json::json;

use crate::form::{FormController, FormMode, SubmitOutcome};
use crate::ipc::error::{err, ok, store_err};
use crate::ipc::types::{AppState, Request};
use crate::record::StudentRecord;

fn form_state(form: &FormController) -> serde_json::Value {
    let (mode, editing_id) = match form.mode() {
        FormMode::Create => ("create", None),
        FormMode::Edit(id) => ("edit", Some(id.clone())),
    };
    json!({
        "mode": mode,
        "editingId": editing_id,
        "fields": form.fields()
    })
}

/// `form.open` with a `student` object binds edit mode to that record;
/// without one it resets to a blank create form (the original UI clears the
/// form whenever the user leaves an edit).
fn handle_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    match req.params.get("student") {
        None | Some(serde_json::Value::Null) => state.form.open_create(),
        Some(v) => {
            let record: StudentRecord = match serde_json::from_value(v.clone()) {
                Ok(r) => r,
                Err(e) => {
                    return err(
                        &req.id,
                        "bad_params",
                        format!("invalid student: {}", e),
                        None,
                    )
                }
            };
            state.form.open_edit(&record);
        }
    }
    ok(&req.id, form_state(&state.form))
}

fn handle_clear(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.form.open_create();
    ok(&req.id, form_state(&state.form))
}

fn handle_state(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, form_state(&state.form))
}

fn handle_submit(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(fields) = req.params.get("fields").cloned() else {
        return err(&req.id, "bad_params", "missing fields", None);
    };
    if !fields.is_object() {
        return err(&req.id, "bad_params", "fields must be an object", None);
    }

    let AppState {
        store, form, list, ..
    } = state;
    let Some(store) = store.as_mut() else {
        return err(&req.id, "no_backend", "select a backend first", None);
    };

    match form.submit(store.as_mut(), fields) {
        SubmitOutcome::Saved { record, created } => {
            // Keep the roster in sync; a refresh hiccup should not fail the
            // save that already happened.
            if let Err(e) = list.refresh(store.as_ref()) {
                tracing::warn!(error = %e, "roster refresh after save failed");
            }
            ok(
                &req.id,
                json!({
                    "student": record,
                    "created": created,
                    "form": form_state(form)
                }),
            )
        }
        SubmitOutcome::Invalid(errors) => err(
            &req.id,
            "validation_failed",
            "student record failed validation",
            Some(json!(errors)),
        ),
        SubmitOutcome::Failed(e) => store_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "form.open" => Some(handle_open(state, req)),
        "form.clear" => Some(handle_clear(state, req)),
        "form.state" => Some(handle_state(state, req)),
        "form.submit" => Some(handle_submit(state, req)),
        _ => None,
    }
}
