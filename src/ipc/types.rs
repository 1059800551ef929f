use serde::Deserialize;

use crate::model::{seed_cohorts, seed_records, GradeCohort, StaffingRecord};

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Session state. Owned by the main loop, mutated only through the
/// handlers, discarded when the host closes stdin.
pub struct AppState {
    pub records: Vec<StaffingRecord>,
    pub cohorts: Vec<GradeCohort>,
    pub school: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            records: seed_records(),
            cohorts: seed_cohorts(),
            school: None,
        }
    }
}
