use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::{PortalError, Result};
use crate::utils::clock::day_start_timestamp;

// 报表筛选参数（原始字符串）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    pub min_date: Option<String>,
    pub max_date: Option<String>,
    pub semester: Option<String>,
    pub course: Option<String>,
}

/// 解析后的筛选条件，`None` 表示不筛选
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub semester_id: Option<i64>,
    pub course_id: Option<i64>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(value: &Option<String>, name: &str) -> Result<Option<NaiveDate>> {
    non_empty(value)
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                PortalError::validation(format!("{name} must be a date (YYYY-MM-DD)"))
            })
        })
        .transpose()
}

fn parse_id(value: &Option<String>, name: &str) -> Result<Option<i64>> {
    non_empty(value)
        .map(|raw| {
            raw.parse::<i64>()
                .map_err(|_| PortalError::validation(format!("{name} must be a numeric id")))
        })
        .transpose()
}

impl ReportQuery {
    pub fn parse(&self) -> Result<ReportFilter> {
        Ok(ReportFilter {
            min_date: parse_date(&self.min_date, "min_date")?,
            max_date: parse_date(&self.max_date, "max_date")?,
            semester_id: parse_id(&self.semester, "semester")?,
            course_id: parse_id(&self.course, "course")?,
        })
    }
}

impl ReportFilter {
    /// 创建时间下界（含）
    pub fn min_created(&self) -> Option<i64> {
        self.min_date.map(day_start_timestamp)
    }

    /// 创建时间上界（不含）：`max_date` 整天都包含在内
    pub fn max_created_exclusive(&self) -> Option<i64> {
        self.max_date
            .and_then(|d| d.succ_opt())
            .map(day_start_timestamp)
    }
}
