use crate::model::{GradeCohort, JobGrade, StaffingRecord};

/// A per-grade shortfall strictly greater than this many teachers is
/// treated as critical by the advisory.
pub const CRITICAL_SHORTFALL: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryFigures {
    pub difference: i64,
    pub deficit: i64,
    pub surplus: i64,
}

/// Signed difference plus its split into deficit/surplus magnitudes.
/// At most one of the two is non-zero; both are zero when the entry is
/// balanced.
pub fn entry_figures(current: i64, required: i64) -> EntryFigures {
    let difference = current - required;
    EntryFigures {
        difference,
        deficit: (-difference).max(0),
        surplus: difference.max(0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AggregateFigures {
    pub total_current: i64,
    pub total_required: i64,
    pub total_deficit: i64,
    pub total_surplus: i64,
}

pub fn aggregate(records: &[StaffingRecord]) -> AggregateFigures {
    let mut totals = AggregateFigures::default();
    for record in records {
        let figures = entry_figures(record.current_count, record.required_count);
        totals.total_current += record.current_count;
        totals.total_required += record.required_count;
        totals.total_deficit += figures.deficit;
        totals.total_surplus += figures.surplus;
    }
    totals
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CohortTotals {
    pub total_classes: i64,
    pub total_students: i64,
}

pub fn cohort_totals(cohorts: &[GradeCohort]) -> CohortTotals {
    let mut totals = CohortTotals::default();
    for cohort in cohorts {
        totals.total_classes += cohort.class_count;
        totals.total_students += cohort.student_count;
    }
    totals
}

/// Students per class section, rounded to the nearest integer. A zero
/// class count yields a displayed zero, never a division error.
pub fn class_density(class_count: i64, student_count: i64) -> i64 {
    if class_count > 0 {
        (student_count as f64 / class_count as f64).round() as i64
    } else {
        0
    }
}

/// Advisory outcome for the current staffing snapshot. The variants
/// are closed so the four-way classification stays exhaustive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    Balanced,
    NoShortfallGrades,
    Critical { grades: Vec<JobGrade> },
    GenericShortfall { total_deficit: i64 },
}

impl Advisory {
    pub fn kind(&self) -> &'static str {
        match self {
            Advisory::Balanced => "balanced",
            Advisory::NoShortfallGrades => "no_shortfall_grades",
            Advisory::Critical { .. } => "critical",
            Advisory::GenericShortfall { .. } => "generic_shortfall",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Advisory::Balanced => {
                "لا يوجد عجز في الكادر التعليمي. الوضع الحالي متوازن.".to_string()
            }
            Advisory::NoShortfallGrades => {
                "جميع الدرجات الوظيفية لديها كادر كافي أو زائد.".to_string()
            }
            Advisory::Critical { grades } => {
                let labels: Vec<&str> = grades.iter().map(|g| g.label()).collect();
                format!(
                    "يوجد عجز حرج في: {}. يتطلب توظيف فوري.",
                    labels.join("، ")
                )
            }
            Advisory::GenericShortfall { total_deficit } => {
                format!(
                    "إجمالي العجز: {} معلم. يتطلب تخطيط للتوظيف.",
                    total_deficit
                )
            }
        }
    }
}

/// Rule-based advisory. First matching rule wins; the ordering is the
/// designed tie-break, not incidental.
pub fn classify_advisory(records: &[StaffingRecord]) -> Advisory {
    let totals = aggregate(records);
    if totals.total_deficit == 0 {
        return Advisory::Balanced;
    }

    let deficit_grades: Vec<&StaffingRecord> = records
        .iter()
        .filter(|r| r.current_count - r.required_count < 0)
        .collect();
    // Unreachable once total_deficit > 0, but the classification must
    // stay total over every state.
    if deficit_grades.is_empty() {
        return Advisory::NoShortfallGrades;
    }

    let critical: Vec<JobGrade> = deficit_grades
        .iter()
        .filter(|r| r.required_count - r.current_count > CRITICAL_SHORTFALL)
        .map(|r| r.grade)
        .collect();
    if !critical.is_empty() {
        return Advisory::Critical { grades: critical };
    }

    Advisory::GenericShortfall {
        total_deficit: totals.total_deficit,
    }
}
