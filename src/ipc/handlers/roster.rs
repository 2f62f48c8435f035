use serde_json::json;

use crate::ipc::error::{err, ok, store_err};
use crate::ipc::types::{AppState, Request};
use crate::list::DeleteOutcome;

fn view_result(state: &AppState) -> serde_json::Value {
    let view = state.list.view();
    json!({
        "view": view,
        "search": state.list.search(),
        "pendingDeleteId": state.list.pending_delete()
    })
}

fn handle_refresh(state: &mut AppState, req: &Request) -> serde_json::Value {
    let AppState { store, list, .. } = state;
    let Some(store) = store.as_ref() else {
        return err(&req.id, "no_backend", "select a backend first", None);
    };
    if let Err(e) = list.refresh(store.as_ref()) {
        return store_err(&req.id, &e);
    }
    ok(&req.id, view_result(state))
}

fn handle_view(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, view_result(state))
}

fn handle_search(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(term) = req.params.get("term").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing term", None);
    };
    state.list.set_search(term);
    ok(&req.id, view_result(state))
}

fn handle_page(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(page) = req.params.get("page").and_then(|v| v.as_u64()) else {
        return err(&req.id, "bad_params", "missing/invalid page", None);
    };
    state.list.set_page(page as usize);
    ok(&req.id, view_result(state))
}

fn handle_delete_request(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(id) = req.params.get("id").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing id", None);
    };
    state.list.request_delete(id);
    ok(&req.id, json!({ "pendingDeleteId": id }))
}

fn handle_delete_cancel(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.list.cancel_delete();
    ok(&req.id, view_result(state))
}

fn handle_delete_confirm(state: &mut AppState, req: &Request) -> serde_json::Value {
    let AppState { store, list, .. } = state;
    let Some(store) = store.as_mut() else {
        return err(&req.id, "no_backend", "select a backend first", None);
    };
    match list.confirm_delete(store.as_mut()) {
        DeleteOutcome::Deleted { id } => {
            let mut result = view_result(state);
            result["deletedId"] = json!(id);
            ok(&req.id, result)
        }
        DeleteOutcome::NothingPending => {
            err(&req.id, "bad_params", "no delete is pending", None)
        }
        DeleteOutcome::Failed(e) => store_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "roster.refresh" => Some(handle_refresh(state, req)),
        "roster.view" => Some(handle_view(state, req)),
        "roster.search" => Some(handle_search(state, req)),
        "roster.page" => Some(handle_page(state, req)),
        "roster.delete.request" => Some(handle_delete_request(state, req)),
        "roster.delete.cancel" => Some(handle_delete_cancel(state, req)),
        "roster.delete.confirm" => Some(handle_delete_confirm(state, req)),
        _ => None,
    }
}
