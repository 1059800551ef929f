use crate::docx;
use crate::export;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::reference;
use serde_json::json;
use std::path::{Path, PathBuf};

fn out_path(req: &Request) -> Result<PathBuf, serde_json::Value> {
    req.params
        .get("outPath")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
        .ok_or_else(|| err(&req.id, "bad_params", "missing params.outPath", None))
}

/// Writes an artifact produced from an immutable snapshot. On failure
/// the partial file is removed best-effort so no broken artifact looks
/// like a success.
fn write_artifact(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    Ok(())
}

fn export_failed(req: &Request, path: &Path, e: anyhow::Error) -> serde_json::Value {
    let _ = std::fs::remove_file(path);
    err(
        &req.id,
        "export_failed",
        format!("{e:#}"),
        Some(json!({ "path": path.to_string_lossy() })),
    )
}

fn handle_staffing_csv(state: &mut AppState, req: &Request) -> serde_json::Value {
    let path = match out_path(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    // Snapshot at invocation time; later edits do not affect this export.
    let records = state.records.clone();
    let csv = export::staffing_csv(&records);
    if let Err(e) = write_artifact(&path, &csv) {
        return export_failed(req, &path, e);
    }

    ok(
        &req.id,
        json!({
            "path": path.to_string_lossy(),
            "fileName": export::staffing_csv_filename(state.school.as_deref()),
            "rows": records.len(),
        }),
    )
}

fn handle_schools_csv(req: &Request) -> serde_json::Value {
    let path = match out_path(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let csv = export::schools_csv(&reference::SCHOOLS);
    if let Err(e) = write_artifact(&path, &csv) {
        return export_failed(req, &path, e);
    }

    ok(
        &req.id,
        json!({
            "path": path.to_string_lossy(),
            "fileName": export::SCHOOLS_CSV_FILENAME,
            "rows": reference::SCHOOLS.len(),
        }),
    )
}

fn handle_report(state: &mut AppState, req: &Request) -> serde_json::Value {
    let path = match out_path(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let records = state.records.clone();
    let cohorts = state.cohorts.clone();
    let school = state.school.clone();
    let date = chrono::Local::now().date_naive();

    if let Err(e) = docx::write_report(&path, school.as_deref(), &records, &cohorts, date) {
        return export_failed(req, &path, e);
    }

    ok(
        &req.id,
        json!({
            "path": path.to_string_lossy(),
            "fileName": export::report_filename(school.as_deref()),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "export.staffingCsv" => Some(handle_staffing_csv(state, req)),
        "export.schoolsCsv" => Some(handle_schools_csv(req)),
        "export.report" => Some(handle_report(state, req)),
        _ => None,
    }
}
