use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_cadred");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn cadred");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

#[test]
fn staffing_csv_round_trips_difference_and_quota() {
    let workspace = temp_dir("cadred-export-staffing");
    let out = workspace.join("teacher_data.csv");

    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let listed = request_ok(&mut stdin, &mut reader, "1", "staffing.list", json!({}));
    let first_id = listed
        .get("entries")
        .and_then(|v| v.as_array())
        .and_then(|a| a.first())
        .and_then(|e| e.get("id"))
        .and_then(|v| v.as_str())
        .expect("first entry id")
        .to_string();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "staffing.updateCount",
        json!({ "id": first_id, "field": "currentCount", "value": 12 }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "staffing.updateCount",
        json!({ "id": first_id, "field": "requiredCount", "value": 10 }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "school.select",
        json!({ "name": "مدرسة النيل الابتدائية" }),
    );

    let exported = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "export.staffingCsv",
        json!({ "outPath": out.to_string_lossy() }),
    );
    assert_eq!(exported.get("rows").and_then(|v| v.as_i64()), Some(6));
    assert_eq!(
        exported.get("fileName").and_then(|v| v.as_str()),
        Some("teacher_data_مدرسة_النيل_الابتدائية.csv")
    );

    let text = std::fs::read_to_string(&out).expect("read exported csv");
    assert!(text.starts_with('\u{feff}'));

    let body = text.trim_start_matches('\u{feff}');
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 7, "header plus one row per grade");
    assert_eq!(
        lines[0],
        "الدرجة الوظيفية,العدد الحالي,العدد المطلوب,العجز/الزيادة,النصاب"
    );

    let first: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(first[0], "\"كبير معلمين\"");
    assert_eq!(first[3], "2");
    assert_eq!(first[4], "16");

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn schools_csv_lists_reference_names() {
    let workspace = temp_dir("cadred-export-schools");
    let out = workspace.join("schools_database.csv");

    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let exported = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "export.schoolsCsv",
        json!({ "outPath": out.to_string_lossy() }),
    );
    let rows = exported
        .get("rows")
        .and_then(|v| v.as_i64())
        .expect("row count");
    assert!(rows > 0);
    assert_eq!(
        exported.get("fileName").and_then(|v| v.as_str()),
        Some("schools_database.csv")
    );

    let text = std::fs::read_to_string(&out).expect("read exported csv");
    let body = text.trim_start_matches('\u{feff}');
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len() as i64, rows + 1);
    assert_eq!(lines[0], "م,اسم المدرسة");
    assert!(lines[1].starts_with("1,\""));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn edits_after_export_do_not_rewrite_the_artifact() {
    let workspace = temp_dir("cadred-export-snapshot");
    let out = workspace.join("teacher_data.csv");

    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let exported = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "export.staffingCsv",
        json!({ "outPath": out.to_string_lossy() }),
    );
    assert_eq!(exported.get("rows").and_then(|v| v.as_i64()), Some(6));
    let before = std::fs::read_to_string(&out).expect("read exported csv");

    let listed = request_ok(&mut stdin, &mut reader, "2", "staffing.list", json!({}));
    let first_id = listed
        .get("entries")
        .and_then(|v| v.as_array())
        .and_then(|a| a.first())
        .and_then(|e| e.get("id"))
        .and_then(|v| v.as_str())
        .expect("first entry id")
        .to_string();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "staffing.updateCount",
        json!({ "id": first_id, "field": "currentCount", "value": 99 }),
    );

    let after = std::fs::read_to_string(&out).expect("re-read exported csv");
    assert_eq!(before, after);

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}
