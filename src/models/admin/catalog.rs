//! 管理实体目录
//!
//! 静态描述六种可管理实体：字段、类型、是否必填、字符串到类型值的转换，
//! 以及默认排序。所有查询都是纯函数，通过 [`EntityKind`] 查表分发。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use super::entities::Season;
use crate::errors::{PortalError, Result};

/// 已转换的字段集合（字段名 → 值）
pub type FieldMap = BTreeMap<&'static str, FieldValue>;

/// 原始表单字段
pub type RawForm = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Semester,
    Professor,
    Course,
    Section,
    ProblemType,
    Message,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Semester,
        EntityKind::Professor,
        EntityKind::Course,
        EntityKind::Section,
        EntityKind::ProblemType,
        EntityKind::Message,
    ];

    /// 路由中使用的名称
    pub fn slug(&self) -> &'static str {
        match self {
            EntityKind::Semester => "semesters",
            EntityKind::Professor => "professors",
            EntityKind::Course => "courses",
            EntityKind::Section => "sections",
            EntityKind::ProblemType => "problems",
            EntityKind::Message => "messages",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Semester => "Semesters",
            EntityKind::Professor => "Professors",
            EntityKind::Course => "Courses",
            EntityKind::Section => "Course Sections",
            EntityKind::ProblemType => "Problem Types",
            EntityKind::Message => "Messages",
        }
    }

    pub fn from_slug(slug: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == slug)
            .ok_or_else(|| PortalError::unknown_entity_kind(format!("Unknown entity kind: {slug}")))
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "references", rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Integer,
    Boolean,
    Date,
    Season,
    /// 指向另一种实体的 id
    Reference(EntityKind),
}

/// 转换后的字段值
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(i64),
    Boolean(bool),
    Date(NaiveDate),
    Season(Season),
}

impl FieldValue {
    pub fn from_opt_text(value: Option<String>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Text)
    }

    pub fn from_opt_int(value: Option<i64>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Integer)
    }

    pub fn from_opt_date(value: Option<NaiveDate>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Date)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    fn mismatch(&self, expected: &str) -> PortalError {
        PortalError::validation(format!("Expected {expected} value, got {self:?}"))
    }

    pub fn as_text(&self) -> Result<String> {
        match self {
            FieldValue::Text(s) => Ok(s.clone()),
            other => Err(other.mismatch("text")),
        }
    }

    pub fn as_opt_text(&self) -> Result<Option<String>> {
        match self {
            FieldValue::Null => Ok(None),
            other => other.as_text().map(Some),
        }
    }

    pub fn as_int(&self) -> Result<i64> {
        match self {
            FieldValue::Integer(i) => Ok(*i),
            other => Err(other.mismatch("integer")),
        }
    }

    pub fn as_opt_int(&self) -> Result<Option<i64>> {
        match self {
            FieldValue::Null => Ok(None),
            other => other.as_int().map(Some),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            FieldValue::Boolean(b) => Ok(*b),
            other => Err(other.mismatch("boolean")),
        }
    }

    pub fn as_date(&self) -> Result<NaiveDate> {
        match self {
            FieldValue::Date(d) => Ok(*d),
            other => Err(other.mismatch("date")),
        }
    }

    pub fn as_opt_date(&self) -> Result<Option<NaiveDate>> {
        match self {
            FieldValue::Null => Ok(None),
            other => other.as_date().map(Some),
        }
    }

    pub fn as_season(&self) -> Result<Season> {
        match self {
            FieldValue::Season(s) => Ok(*s),
            other => Err(other.mismatch("season")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub field_type: FieldType,
    pub required: bool,
}

const fn field(
    name: &'static str,
    label: &'static str,
    field_type: FieldType,
    required: bool,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        field_type,
        required,
    }
}

static SEMESTER_FIELDS: [FieldSpec; 4] = [
    field("year", "Year", FieldType::Integer, true),
    field("season", "Season", FieldType::Season, true),
    field("start_date", "Start Date", FieldType::Date, true),
    field("end_date", "End Date", FieldType::Date, true),
];

static PROFESSOR_FIELDS: [FieldSpec; 2] = [
    field("fname", "First Name", FieldType::Text, true),
    field("lname", "Last Name", FieldType::Text, true),
];

static COURSE_FIELDS: [FieldSpec; 3] = [
    field("number", "Course Number", FieldType::Text, true),
    field("name", "Course Name", FieldType::Text, false),
    field("on_display", "On Display", FieldType::Boolean, false),
];

static SECTION_FIELDS: [FieldSpec; 5] = [
    field("number", "Section Number", FieldType::Integer, true),
    field("time", "Time", FieldType::Text, false),
    field(
        "course_id",
        "Course",
        FieldType::Reference(EntityKind::Course),
        true,
    ),
    field(
        "semester_id",
        "Semester",
        FieldType::Reference(EntityKind::Semester),
        false,
    ),
    field(
        "professor_id",
        "Professor",
        FieldType::Reference(EntityKind::Professor),
        false,
    ),
];

static PROBLEM_TYPE_FIELDS: [FieldSpec; 1] =
    [field("description", "Description", FieldType::Text, true)];

static MESSAGE_FIELDS: [FieldSpec; 3] = [
    field("message", "Message", FieldType::Text, true),
    field("start_date", "Start Date", FieldType::Date, false),
    field("end_date", "End Date", FieldType::Date, false),
];

/// 实体的字段定义
pub fn fields_for(kind: EntityKind) -> &'static [FieldSpec] {
    match kind {
        EntityKind::Semester => &SEMESTER_FIELDS,
        EntityKind::Professor => &PROFESSOR_FIELDS,
        EntityKind::Course => &COURSE_FIELDS,
        EntityKind::Section => &SECTION_FIELDS,
        EntityKind::ProblemType => &PROBLEM_TYPE_FIELDS,
        EntityKind::Message => &MESSAGE_FIELDS,
    }
}

/// 排序项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderTerm {
    pub field: &'static str,
    pub descending: bool,
}

const fn asc(field: &'static str) -> OrderTerm {
    OrderTerm {
        field,
        descending: false,
    }
}

const fn desc(field: &'static str) -> OrderTerm {
    OrderTerm {
        field,
        descending: true,
    }
}

static SEMESTER_ORDER: [OrderTerm; 1] = [asc("start_date")];
static PROFESSOR_ORDER: [OrderTerm; 2] = [asc("lname"), asc("fname")];
static COURSE_ORDER: [OrderTerm; 1] = [asc("number")];
static SECTION_ORDER: [OrderTerm; 1] = [asc("number")];
static PROBLEM_TYPE_ORDER: [OrderTerm; 1] = [asc("description")];
static MESSAGE_ORDER: [OrderTerm; 1] = [desc("end_date")];

/// 实体的默认排序
pub fn default_order(kind: EntityKind) -> &'static [OrderTerm] {
    match kind {
        EntityKind::Semester => &SEMESTER_ORDER,
        EntityKind::Professor => &PROFESSOR_ORDER,
        EntityKind::Course => &COURSE_ORDER,
        EntityKind::Section => &SECTION_ORDER,
        EntityKind::ProblemType => &PROBLEM_TYPE_ORDER,
        EntityKind::Message => &MESSAGE_ORDER,
    }
}

/// 按排序项比较两组字段
pub fn compare_fields(a: &FieldMap, b: &FieldMap, order: &[OrderTerm]) -> Ordering {
    static NULL: FieldValue = FieldValue::Null;
    for term in order {
        let left = a.get(term.field).unwrap_or(&NULL);
        let right = b.get(term.field).unwrap_or(&NULL);
        let ordering = if term.descending {
            right.cmp(left)
        } else {
            left.cmp(right)
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// 复选框语义：缺失、空串、"false"、"off"、"0"、"no" 都是 false
fn parse_checkbox(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "" | "false" | "off" | "0" | "no"
    )
}

fn parse_date(raw: &str, label: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| PortalError::validation(format!("{label} must be a date (YYYY-MM-DD)")))
}

fn parse_int(raw: &str, label: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| PortalError::validation(format!("{label} must be a whole number")))
}

impl FieldSpec {
    /// 把原始字符串转换为字段值
    pub fn coerce(&self, raw: Option<&str>) -> Result<FieldValue> {
        let raw = raw.map(str::trim).unwrap_or_default();

        if self.field_type == FieldType::Boolean {
            return Ok(FieldValue::Boolean(parse_checkbox(raw)));
        }

        if raw.is_empty() {
            return if self.required {
                Err(PortalError::validation(format!(
                    "{} is required",
                    self.label
                )))
            } else {
                Ok(FieldValue::Null)
            };
        }

        match self.field_type {
            FieldType::Text => Ok(FieldValue::Text(raw.to_string())),
            FieldType::Integer | FieldType::Reference(_) => {
                parse_int(raw, self.label).map(FieldValue::Integer)
            }
            FieldType::Date => parse_date(raw, self.label).map(FieldValue::Date),
            FieldType::Season => raw
                .parse::<Season>()
                .map(FieldValue::Season)
                .map_err(PortalError::validation),
            FieldType::Boolean => Ok(FieldValue::Boolean(parse_checkbox(raw))),
        }
    }
}

/// 按目录转换整张表单，并做跨字段校验
pub fn coerce_form(kind: EntityKind, form: &RawForm) -> Result<FieldMap> {
    let mut fields = FieldMap::new();
    for spec in fields_for(kind) {
        let value = spec.coerce(form.get(spec.name).map(String::as_str))?;
        fields.insert(spec.name, value);
    }
    validate_fields(kind, &fields)?;
    Ok(fields)
}

/// 开始日期不能晚于结束日期
fn validate_fields(kind: EntityKind, fields: &FieldMap) -> Result<()> {
    if !matches!(kind, EntityKind::Semester | EntityKind::Message) {
        return Ok(());
    }
    if let (Some(FieldValue::Date(start)), Some(FieldValue::Date(end))) =
        (fields.get("start_date"), fields.get("end_date"))
        && start > end
    {
        return Err(PortalError::validation(
            "Start date must not be after end date",
        ));
    }
    Ok(())
}

/// 班次列表的复合排序键：学期开始日期倒序（无学期排最后），然后课程号，然后班次号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSortKey {
    pub semester_start: Option<NaiveDate>,
    pub course_number: String,
    pub section_number: i64,
}

impl Ord for SectionSortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_semester = match (self.semester_start, other.semester_start) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_semester
            .then_with(|| self.course_number.cmp(&other.course_number))
            .then_with(|| self.section_number.cmp(&other.section_number))
    }
}

impl PartialOrd for SectionSortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
