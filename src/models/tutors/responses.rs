use serde::Serialize;
use std::collections::BTreeSet;

use super::entities::Tutor;
use crate::models::admin::entities::Course;

/// 辅导员编辑页数据；`tutor` 为空表示新建
#[derive(Debug, Clone, Serialize)]
pub struct TutorFormResponse {
    pub tutor: Option<Tutor>,
    pub courses: Vec<Course>,
    pub assigned: BTreeSet<i64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TutorSaveOutcome {
    Created { tutor: Tutor },
    Updated { tutor: Tutor },
    Deleted { email: String },
}
