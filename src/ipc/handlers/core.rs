use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::reference;
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "school": state.school,
        }),
    )
}

fn handle_school_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let name = req
        .params
        .get("name")
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let Some(name) = name else {
        return err(&req.id, "bad_params", "missing params.name", None);
    };

    state.school = Some(name.clone());
    ok(&req.id, json!({ "school": name }))
}

fn handle_school_clear(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.school = None;
    ok(&req.id, json!({ "school": serde_json::Value::Null }))
}

fn handle_schools_list(req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "schools": reference::SCHOOLS }))
}

fn handle_subjects_list(req: &Request) -> serde_json::Value {
    let subjects: Vec<serde_json::Value> = reference::SUBJECTS
        .iter()
        .map(|(name, code)| json!({ "name": name, "code": code }))
        .collect();
    ok(&req.id, json!({ "subjects": subjects }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "school.select" => Some(handle_school_select(state, req)),
        "school.clear" => Some(handle_school_clear(state, req)),
        "schools.list" => Some(handle_schools_list(req)),
        "subjects.list" => Some(handle_subjects_list(req)),
        _ => None,
    }
}
