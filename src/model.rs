use uuid::Uuid;

/// Closed set of job grades for the teaching cadre. Display labels and
/// weekly quotas come from the ministry staffing tables and never
/// change at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobGrade {
    Senior,
    Expert,
    FirstA,
    First,
    Teacher,
    Assistant,
}

impl JobGrade {
    pub const ALL: [JobGrade; 6] = [
        JobGrade::Senior,
        JobGrade::Expert,
        JobGrade::FirstA,
        JobGrade::First,
        JobGrade::Teacher,
        JobGrade::Assistant,
    ];

    pub fn label(self) -> &'static str {
        match self {
            JobGrade::Senior => "كبير معلمين",
            JobGrade::Expert => "معلم خبير",
            JobGrade::FirstA => "معلم أول (أ)",
            JobGrade::First => "معلم أول",
            JobGrade::Teacher => "معلم",
            JobGrade::Assistant => "معلم مساعد",
        }
    }

    /// Weekly teaching-load quota. Informational only; it never enters
    /// the deficit/surplus arithmetic.
    pub fn weekly_quota(self) -> i64 {
        match self {
            JobGrade::Senior => 16,
            JobGrade::Expert => 18,
            JobGrade::FirstA => 20,
            JobGrade::First => 22,
            JobGrade::Teacher => 24,
            JobGrade::Assistant => 24,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffingField {
    CurrentCount,
    RequiredCount,
}

impl StaffingField {
    pub fn parse(s: &str) -> Option<StaffingField> {
        match s {
            "currentCount" => Some(StaffingField::CurrentCount),
            "requiredCount" => Some(StaffingField::RequiredCount),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StaffingRecord {
    pub id: String,
    pub grade: JobGrade,
    pub current_count: i64,
    pub required_count: i64,
    pub quota: i64,
}

impl StaffingRecord {
    /// Stores a count edit. Negative input is clamped to zero; no
    /// negative count is ever observable.
    pub fn set_count(&mut self, field: StaffingField, value: i64) {
        let clamped = value.max(0);
        match field {
            StaffingField::CurrentCount => self.current_count = clamped,
            StaffingField::RequiredCount => self.required_count = clamped,
        }
    }
}

/// One seeded record per job grade, counts at zero, in declared order.
/// Records are never added or removed after this.
pub fn seed_records() -> Vec<StaffingRecord> {
    JobGrade::ALL
        .iter()
        .map(|&grade| StaffingRecord {
            id: Uuid::new_v4().to_string(),
            grade,
            current_count: 0,
            required_count: 0,
            quota: grade.weekly_quota(),
        })
        .collect()
}

/// Closed set of class levels (primary grades 1 through 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassLevel {
    Grade1,
    Grade2,
    Grade3,
    Grade4,
    Grade5,
    Grade6,
}

impl ClassLevel {
    pub const ALL: [ClassLevel; 6] = [
        ClassLevel::Grade1,
        ClassLevel::Grade2,
        ClassLevel::Grade3,
        ClassLevel::Grade4,
        ClassLevel::Grade5,
        ClassLevel::Grade6,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ClassLevel::Grade1 => "grade1",
            ClassLevel::Grade2 => "grade2",
            ClassLevel::Grade3 => "grade3",
            ClassLevel::Grade4 => "grade4",
            ClassLevel::Grade5 => "grade5",
            ClassLevel::Grade6 => "grade6",
        }
    }

    pub fn parse(s: &str) -> Option<ClassLevel> {
        ClassLevel::ALL.iter().copied().find(|l| l.key() == s)
    }

    pub fn label(self) -> &'static str {
        match self {
            ClassLevel::Grade1 => "الصف الأول",
            ClassLevel::Grade2 => "الصف الثاني",
            ClassLevel::Grade3 => "الصف الثالث",
            ClassLevel::Grade4 => "الصف الرابع",
            ClassLevel::Grade5 => "الصف الخامس",
            ClassLevel::Grade6 => "الصف السادس",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CohortField {
    ClassCount,
    StudentCount,
}

impl CohortField {
    pub fn parse(s: &str) -> Option<CohortField> {
        match s {
            "classCount" => Some(CohortField::ClassCount),
            "studentCount" => Some(CohortField::StudentCount),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GradeCohort {
    pub level: ClassLevel,
    pub class_count: i64,
    pub student_count: i64,
}

impl GradeCohort {
    pub fn set_count(&mut self, field: CohortField, value: i64) {
        let clamped = value.max(0);
        match field {
            CohortField::ClassCount => self.class_count = clamped,
            CohortField::StudentCount => self.student_count = clamped,
        }
    }
}

pub fn seed_cohorts() -> Vec<GradeCohort> {
    ClassLevel::ALL
        .iter()
        .map(|&level| GradeCohort {
            level,
            class_count: 0,
            student_count: 0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_produces_six_zeroed_records_in_declared_order() {
        let records = seed_records();
        assert_eq!(records.len(), 6);
        for (record, grade) in records.iter().zip(JobGrade::ALL) {
            assert_eq!(record.grade, grade);
            assert_eq!(record.current_count, 0);
            assert_eq!(record.required_count, 0);
            assert_eq!(record.quota, grade.weekly_quota());
        }
        assert_eq!(records[0].quota, 16);
        assert_eq!(records[5].quota, 24);
    }

    #[test]
    fn negative_count_updates_clamp_to_zero() {
        let mut record = seed_records().remove(0);
        record.set_count(StaffingField::CurrentCount, -7);
        assert_eq!(record.current_count, 0);
        record.set_count(StaffingField::RequiredCount, -1);
        assert_eq!(record.required_count, 0);

        let mut cohort = seed_cohorts().remove(0);
        cohort.set_count(CohortField::StudentCount, -50);
        assert_eq!(cohort.student_count, 0);
    }

    #[test]
    fn class_level_keys_round_trip() {
        for level in ClassLevel::ALL {
            assert_eq!(ClassLevel::parse(level.key()), Some(level));
        }
        assert_eq!(ClassLevel::parse("grade7"), None);
    }
}
