use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// 辅导员
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tutor {
    pub email: String,
    pub fname: Option<String>,
    pub lname: Option<String>,
    #[serde(skip)]
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_working: bool,
}

impl Tutor {
    /// 新建辅导员的默认值：启用、非管理员、不在岗
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            fname: None,
            lname: None,
            password_hash: None,
            is_active: true,
            is_superuser: false,
            is_working: false,
        }
    }

    pub fn full_name(&self) -> String {
        match (self.fname.as_deref(), self.lname.as_deref()) {
            (Some(f), Some(l)) => format!("{f} {l}"),
            (Some(n), None) | (None, Some(n)) => n.to_string(),
            (None, None) => self.email.clone(),
        }
    }

    /// 是否可以被分配到新工单
    pub fn is_assignable(&self) -> bool {
        self.is_active
    }
}

/// 课程集合的增删计划
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseChanges {
    pub add: BTreeSet<i64>,
    pub remove: BTreeSet<i64>,
}

impl CourseChanges {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

/// 比较当前课程集合和期望集合，得到需要新增和移除的课程
pub fn plan_course_changes(current: &BTreeSet<i64>, desired: &BTreeSet<i64>) -> CourseChanges {
    CourseChanges {
        add: desired.difference(current).copied().collect(),
        remove: current.difference(desired).copied().collect(),
    }
}
