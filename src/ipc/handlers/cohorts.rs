use crate::calc;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::{ClassLevel, CohortField, GradeCohort};
use serde_json::json;

fn cohort_json(cohort: &GradeCohort) -> serde_json::Value {
    json!({
        "level": cohort.level.key(),
        "label": cohort.level.label(),
        "classCount": cohort.class_count,
        "studentCount": cohort.student_count,
        "density": calc::class_density(cohort.class_count, cohort.student_count),
    })
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let cohorts: Vec<serde_json::Value> = state.cohorts.iter().map(cohort_json).collect();
    ok(&req.id, json!({ "cohorts": cohorts }))
}

fn handle_update_count(state: &mut AppState, req: &Request) -> serde_json::Value {
    let level = match req
        .params
        .get("level")
        .and_then(|v| v.as_str())
        .and_then(ClassLevel::parse)
    {
        Some(v) => v,
        None => {
            return err(
                &req.id,
                "bad_params",
                "level must be one of: grade1..grade6",
                None,
            )
        }
    };
    let field = match req
        .params
        .get("field")
        .and_then(|v| v.as_str())
        .and_then(CohortField::parse)
    {
        Some(v) => v,
        None => {
            return err(
                &req.id,
                "bad_params",
                "field must be one of: classCount, studentCount",
                None,
            )
        }
    };
    let value = match req.params.get("value").and_then(|v| v.as_i64()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing/invalid value", None),
    };

    let Some(cohort) = state.cohorts.iter_mut().find(|c| c.level == level) else {
        // Cohorts are seeded for every level, so this cannot happen.
        return err(&req.id, "not_found", "cohort not found", None);
    };

    cohort.set_count(field, value);
    let updated = cohort_json(cohort);
    let totals = calc::cohort_totals(&state.cohorts);
    ok(
        &req.id,
        json!({
            "cohort": updated,
            "totalClasses": totals.total_classes,
            "totalStudents": totals.total_students,
        }),
    )
}

fn handle_totals(state: &mut AppState, req: &Request) -> serde_json::Value {
    let totals = calc::cohort_totals(&state.cohorts);
    ok(
        &req.id,
        json!({
            "totalClasses": totals.total_classes,
            "totalStudents": totals.total_students,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "cohorts.list" => Some(handle_list(state, req)),
        "cohorts.updateCount" => Some(handle_update_count(state, req)),
        "cohorts.totals" => Some(handle_totals(state, req)),
        _ => None,
    }
}
