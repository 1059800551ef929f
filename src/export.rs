use crate::model::StaffingRecord;

/// Byte-order mark so spreadsheet apps detect the Arabic encoding.
pub const UTF8_BOM: &str = "\u{feff}";

const STAFFING_CSV_HEADER: &str =
    "الدرجة الوظيفية,العدد الحالي,العدد المطلوب,العجز/الزيادة,النصاب";
const SCHOOLS_CSV_HEADER: &str = "م,اسم المدرسة";

pub const SCHOOLS_CSV_FILENAME: &str = "schools_database.csv";
const STAFFING_CSV_FALLBACK: &str = "teacher_data.csv";
const REPORT_FALLBACK_LABEL: &str = "المدرسة";

fn csv_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Staffing balance table: one row per record in declared grade order,
/// label quoted, difference signed, rows newline-joined with no
/// trailing newline.
pub fn staffing_csv(records: &[StaffingRecord]) -> String {
    let rows: Vec<String> = records
        .iter()
        .map(|record| {
            let difference = record.current_count - record.required_count;
            format!(
                "{},{},{},{},{}",
                csv_quote(record.grade.label()),
                record.current_count,
                record.required_count,
                difference,
                record.quota
            )
        })
        .collect();
    format!("{}{}\n{}", UTF8_BOM, STAFFING_CSV_HEADER, rows.join("\n"))
}

/// Pass-through reference list, numbered from 1.
pub fn schools_csv(schools: &[&str]) -> String {
    let rows: Vec<String> = schools
        .iter()
        .enumerate()
        .map(|(i, school)| format!("{},{}", i + 1, csv_quote(school)))
        .collect();
    format!("{}{}\n{}", UTF8_BOM, SCHOOLS_CSV_HEADER, rows.join("\n"))
}

pub fn staffing_csv_filename(school: Option<&str>) -> String {
    match school {
        Some(name) if !name.trim().is_empty() => {
            let slug: String = name
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("_");
            format!("teacher_data_{}.csv", slug)
        }
        _ => STAFFING_CSV_FALLBACK.to_string(),
    }
}

pub fn report_filename(school: Option<&str>) -> String {
    let label = match school {
        Some(name) if !name.trim().is_empty() => name,
        _ => REPORT_FALLBACK_LABEL,
    };
    format!("تقرير_{}.docx", label)
}
