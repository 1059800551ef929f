use crate::calc;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::{StaffingField, StaffingRecord};
use serde_json::json;

fn entry_json(record: &StaffingRecord) -> serde_json::Value {
    let figures = calc::entry_figures(record.current_count, record.required_count);
    json!({
        "id": record.id,
        "grade": record.grade.label(),
        "currentCount": record.current_count,
        "requiredCount": record.required_count,
        "quota": record.quota,
        "difference": figures.difference,
        "deficit": figures.deficit,
        "surplus": figures.surplus,
    })
}

fn totals_json(records: &[StaffingRecord]) -> serde_json::Value {
    let totals = calc::aggregate(records);
    json!({
        "totalCurrent": totals.total_current,
        "totalRequired": totals.total_required,
        "totalDeficit": totals.total_deficit,
        "totalSurplus": totals.total_surplus,
    })
}

fn advisory_json(advisory: &calc::Advisory) -> serde_json::Value {
    let mut value = json!({
        "kind": advisory.kind(),
        "message": advisory.message(),
    });
    match advisory {
        calc::Advisory::Critical { grades } => {
            let labels: Vec<&str> = grades.iter().map(|g| g.label()).collect();
            value["criticalGrades"] = json!(labels);
        }
        calc::Advisory::GenericShortfall { total_deficit } => {
            value["totalDeficit"] = json!(total_deficit);
        }
        _ => {}
    }
    value
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = state.records.iter().map(entry_json).collect();
    ok(&req.id, json!({ "entries": entries }))
}

fn handle_update_count(state: &mut AppState, req: &Request) -> serde_json::Value {
    let record_id = match req.params.get("id").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing id", None),
    };
    let field = match req
        .params
        .get("field")
        .and_then(|v| v.as_str())
        .and_then(StaffingField::parse)
    {
        Some(v) => v,
        None => {
            return err(
                &req.id,
                "bad_params",
                "field must be one of: currentCount, requiredCount",
                None,
            )
        }
    };
    let value = match req.params.get("value").and_then(|v| v.as_i64()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing/invalid value", None),
    };

    let Some(record) = state.records.iter_mut().find(|r| r.id == record_id) else {
        return err(
            &req.id,
            "not_found",
            "staffing record not found",
            Some(json!({ "id": record_id })),
        );
    };

    record.set_count(field, value);
    let entry = entry_json(record);
    ok(
        &req.id,
        json!({
            "entry": entry,
            "totals": totals_json(&state.records),
        }),
    )
}

fn handle_summary(state: &mut AppState, req: &Request) -> serde_json::Value {
    let advisory = calc::classify_advisory(&state.records);
    ok(
        &req.id,
        json!({
            "totals": totals_json(&state.records),
            "advisory": advisory_json(&advisory),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "staffing.list" => Some(handle_list(state, req)),
        "staffing.updateCount" => Some(handle_update_count(state, req)),
        "staffing.summary" => Some(handle_summary(state, req)),
        _ => None,
    }
}
