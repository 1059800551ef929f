use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::calc;
use crate::model::{GradeCohort, StaffingRecord};

const CONTENT_TYPES_ENTRY: &str = "[Content_Types].xml";
const RELS_ENTRY: &str = "_rels/.rels";
const DOCUMENT_ENTRY: &str = "word/document.xml";

const CONTENT_TYPES_XML: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>",
    "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
    "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>",
    "<Default Extension=\"xml\" ContentType=\"application/xml\"/>",
    "<Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>",
    "</Types>"
);

const RELS_XML: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>",
    "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>",
    "</Relationships>"
);

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn arabic_indic_digits(s: &str) -> String {
    s.chars()
        .map(|ch| match ch {
            '0'..='9' => {
                let offset = ch as u32 - '0' as u32;
                char::from_u32('\u{0660}' as u32 + offset).unwrap_or(ch)
            }
            _ => ch,
        })
        .collect()
}

/// Localized report date line, d/m/yyyy in Arabic-Indic digits.
pub fn report_date_line(date: NaiveDate) -> String {
    let plain = format!("{}/{}/{}", date.day(), date.month(), date.year());
    format!("تاريخ التقرير: {}", arabic_indic_digits(&plain))
}

fn run(text: &str, bold: bool) -> String {
    let props = if bold { "<w:rPr><w:b/></w:rPr>" } else { "" };
    format!(
        "<w:r>{}<w:t xml:space=\"preserve\">{}</w:t></w:r>",
        props,
        xml_escape(text)
    )
}

fn heading(text: &str, centered: bool) -> String {
    let jc = if centered { "<w:jc w:val=\"center\"/>" } else { "" };
    format!(
        "<w:p><w:pPr><w:bidi/>{}<w:rPr><w:b/><w:sz w:val=\"32\"/></w:rPr></w:pPr><w:r><w:rPr><w:b/><w:sz w:val=\"32\"/></w:rPr><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
        jc,
        xml_escape(text)
    )
}

fn para(text: &str, centered: bool, bold: bool) -> String {
    let jc = if centered { "<w:jc w:val=\"center\"/>" } else { "" };
    format!(
        "<w:p><w:pPr><w:bidi/>{}</w:pPr>{}</w:p>",
        jc,
        run(text, bold)
    )
}

fn cell(text: &str, bold: bool, bordered: bool) -> String {
    let borders = if bordered {
        concat!(
            "<w:tcBorders>",
            "<w:top w:val=\"single\" w:sz=\"4\"/>",
            "<w:bottom w:val=\"single\" w:sz=\"4\"/>",
            "<w:start w:val=\"single\" w:sz=\"4\"/>",
            "<w:end w:val=\"single\" w:sz=\"4\"/>",
            "</w:tcBorders>"
        )
    } else {
        ""
    };
    format!(
        "<w:tc><w:tcPr>{}</w:tcPr>{}</w:tc>",
        borders,
        para(text, true, bold)
    )
}

fn table_row(cells: &[String]) -> String {
    format!("<w:tr>{}</w:tr>", cells.concat())
}

fn table(rows: &[String], bidi: bool) -> String {
    let bidi_visual = if bidi { "<w:bidiVisual/>" } else { "" };
    format!(
        "<w:tbl><w:tblPr><w:tblW w:w=\"5000\" w:type=\"pct\"/>{}</w:tblPr>{}</w:tbl>",
        bidi_visual,
        rows.concat()
    )
}

/// Builds the report body. Kept separate from the package writer so
/// the structure is assertable without unzipping anything.
pub fn build_document_xml(
    school: Option<&str>,
    records: &[StaffingRecord],
    cohorts: &[GradeCohort],
    date: NaiveDate,
) -> String {
    let totals = calc::aggregate(records);
    let cohort_totals = calc::cohort_totals(cohorts);

    let school_label = match school {
        Some(name) if !name.trim().is_empty() => name,
        _ => "غير محدد",
    };

    let mut body = String::new();
    body.push_str(&heading("تقرير العجز والزيادة في هيئة التدريس", true));
    body.push_str(&para(&format!("المدرسة: {}", school_label), true, true));
    body.push_str(&para(&report_date_line(date), true, false));

    body.push_str(&heading("بيانات الفصول والتلاميذ:", false));
    body.push_str(&para(
        &format!(
            "إجمالي عدد الفصول: {} | إجمالي عدد التلاميذ: {}",
            cohort_totals.total_classes, cohort_totals.total_students
        ),
        false,
        false,
    ));

    body.push_str(&heading("جدول موازنة الكادر:", false));
    let header_row = table_row(&[
        cell("الدرجة الوظيفية", true, true),
        cell("الحالي", true, true),
        cell("المطلوب", true, true),
        cell("العجز", true, true),
        cell("الزيادة", true, true),
        cell("النصاب", true, true),
    ]);
    let mut rows = vec![header_row];
    for record in records {
        let figures = calc::entry_figures(record.current_count, record.required_count);
        let deficit = if figures.deficit > 0 {
            figures.deficit.to_string()
        } else {
            "-".to_string()
        };
        let surplus = if figures.surplus > 0 {
            figures.surplus.to_string()
        } else {
            "-".to_string()
        };
        rows.push(table_row(&[
            cell(record.grade.label(), true, true),
            cell(&record.current_count.to_string(), false, true),
            cell(&record.required_count.to_string(), false, true),
            cell(&deficit, false, true),
            cell(&surplus, false, true),
            cell(&record.quota.to_string(), false, true),
        ]));
    }
    body.push_str(&table(&rows, true));

    body.push_str(&heading("ملخص الإحصائيات:", false));
    body.push_str(&para(
        &format!("إجمالي المعلمين الحاليين: {}", totals.total_current),
        false,
        false,
    ));
    body.push_str(&para(
        &format!("إجمالي القوة المطلوبة: {}", totals.total_required),
        false,
        false,
    ));
    body.push_str(&para(
        &format!("إجمالي العجز (معلم): {}", totals.total_deficit),
        false,
        false,
    ));
    body.push_str(&para(
        &format!("إجمالي الزيادة (معلم): {}", totals.total_surplus),
        false,
        false,
    ));

    body.push_str(&heading("التوقيعات", false));
    let titles = table_row(&[
        cell("مدير المدرسة", true, false),
        cell("مسؤول الإحصاء", true, false),
        cell("مدير الإدارة", true, false),
    ]);
    let dots = table_row(&[
        cell("....................", false, false),
        cell("....................", false, false),
        cell("....................", false, false),
    ]);
    body.push_str(&table(&[titles, dots], true));

    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>",
            "<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">",
            "<w:body>{}</w:body></w:document>"
        ),
        body
    )
}

/// Writes the full report package. A pure read of the snapshot passed
/// in; any failure leaves the caller's state untouched.
pub fn write_report(
    out_path: &Path,
    school: Option<&str>,
    records: &[StaffingRecord],
    cohorts: &[GradeCohort],
    date: NaiveDate,
) -> anyhow::Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create directory {}", parent.to_string_lossy())
            })?;
        }
    }

    let out_file = File::create(out_path).with_context(|| {
        format!(
            "failed to create output file {}",
            out_path.to_string_lossy()
        )
    })?;
    let mut zip = ZipWriter::new(out_file);
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(CONTENT_TYPES_ENTRY, opts)
        .context("failed to start content-types entry")?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())
        .context("failed to write content-types entry")?;

    zip.start_file(RELS_ENTRY, opts)
        .context("failed to start package relationships entry")?;
    zip.write_all(RELS_XML.as_bytes())
        .context("failed to write package relationships entry")?;

    zip.start_file(DOCUMENT_ENTRY, opts)
        .context("failed to start document entry")?;
    let document = build_document_xml(school, records, cohorts, date);
    zip.write_all(document.as_bytes())
        .context("failed to write document entry")?;

    zip.finish().context("failed to finalize report package")?;
    Ok(())
}
