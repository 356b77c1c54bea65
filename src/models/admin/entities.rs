use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::catalog::{EntityKind, FieldMap, FieldValue};

// 学期季节
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Spring = 1,
    Summer = 2,
    Fall = 3,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Spring, Season::Summer, Season::Fall];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Season {
    type Err = String;

    /// 接受季节名称（不区分大小写）或序号 1/2/3
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "1" | "spring" => Ok(Season::Spring),
            "2" | "summer" => Ok(Season::Summer),
            "3" | "fall" => Ok(Season::Fall),
            _ => Err(format!("Invalid season: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Semester {
    pub id: i64,
    pub year: i64,
    pub season: Season,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Semester {
    pub fn title(&self) -> String {
        format!("{} {:04}", self.season, self.year)
    }

    /// 学期是否包含某天（首尾都包含）
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    pub fn to_fields(&self) -> FieldMap {
        FieldMap::from([
            ("year", FieldValue::Integer(self.year)),
            ("season", FieldValue::Season(self.season)),
            ("start_date", FieldValue::Date(self.start_date)),
            ("end_date", FieldValue::Date(self.end_date)),
        ])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Professor {
    pub id: i64,
    pub fname: String,
    pub lname: String,
}

impl Professor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.fname, self.lname)
    }

    pub fn last_first(&self) -> String {
        format!("{}, {}", self.lname, self.fname)
    }

    pub fn to_fields(&self) -> FieldMap {
        FieldMap::from([
            ("fname", FieldValue::Text(self.fname.clone())),
            ("lname", FieldValue::Text(self.lname.clone())),
        ])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: i64,
    pub number: String,
    pub name: Option<String>,
    pub on_display: bool,
}

impl Course {
    pub fn title(&self) -> String {
        match &self.name {
            Some(name) => format!("{}: {}", self.number, name),
            None => self.number.clone(),
        }
    }

    pub fn to_fields(&self) -> FieldMap {
        FieldMap::from([
            ("number", FieldValue::Text(self.number.clone())),
            ("name", FieldValue::from_opt_text(self.name.clone())),
            ("on_display", FieldValue::Boolean(self.on_display)),
        ])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    pub id: i64,
    pub number: i64,
    pub time: Option<String>,
    pub course_id: i64,
    pub semester_id: Option<i64>,
    pub professor_id: Option<i64>,
}

impl Section {
    /// 班次的简短标签，如 `001, MWF 10:00, Smith`
    pub fn describe(&self, professor: Option<&Professor>) -> String {
        let mut parts = vec![format!("{:03}", self.number)];
        if let Some(time) = self.time.as_deref().filter(|t| !t.is_empty()) {
            parts.push(time.to_string());
        }
        if let Some(professor) = professor {
            parts.push(professor.lname.clone());
        }
        parts.join(", ")
    }

    pub fn to_fields(&self) -> FieldMap {
        FieldMap::from([
            ("number", FieldValue::Integer(self.number)),
            ("time", FieldValue::from_opt_text(self.time.clone())),
            ("course_id", FieldValue::Integer(self.course_id)),
            ("semester_id", FieldValue::from_opt_int(self.semester_id)),
            ("professor_id", FieldValue::from_opt_int(self.professor_id)),
        ])
    }
}

/// 工单展示标签 `{课程号}-{班次号:03}`
pub fn section_label(course_number: &str, section_number: i64) -> String {
    format!("{course_number}-{section_number:03}")
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProblemType {
    pub id: i64,
    pub description: String,
}

impl ProblemType {
    pub fn to_fields(&self) -> FieldMap {
        FieldMap::from([("description", FieldValue::Text(self.description.clone()))])
    }
}

// 状态页公告
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: i64,
    pub message: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Message {
    /// 某天是否展示，缺失的边界视为不限
    pub fn is_visible_on(&self, day: NaiveDate) -> bool {
        self.start_date.is_none_or(|start| start <= day)
            && self.end_date.is_none_or(|end| day <= end)
    }

    pub fn to_fields(&self) -> FieldMap {
        FieldMap::from([
            ("message", FieldValue::Text(self.message.clone())),
            ("start_date", FieldValue::from_opt_date(self.start_date)),
            ("end_date", FieldValue::from_opt_date(self.end_date)),
        ])
    }
}

/// 六种管理实体的统一表示
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdminEntity {
    Semester(Semester),
    Professor(Professor),
    Course(Course),
    Section(Section),
    ProblemType(ProblemType),
    Message(Message),
}

impl AdminEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            AdminEntity::Semester(_) => EntityKind::Semester,
            AdminEntity::Professor(_) => EntityKind::Professor,
            AdminEntity::Course(_) => EntityKind::Course,
            AdminEntity::Section(_) => EntityKind::Section,
            AdminEntity::ProblemType(_) => EntityKind::ProblemType,
            AdminEntity::Message(_) => EntityKind::Message,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            AdminEntity::Semester(e) => e.id,
            AdminEntity::Professor(e) => e.id,
            AdminEntity::Course(e) => e.id,
            AdminEntity::Section(e) => e.id,
            AdminEntity::ProblemType(e) => e.id,
            AdminEntity::Message(e) => e.id,
        }
    }

    pub fn fields(&self) -> FieldMap {
        match self {
            AdminEntity::Semester(e) => e.to_fields(),
            AdminEntity::Professor(e) => e.to_fields(),
            AdminEntity::Course(e) => e.to_fields(),
            AdminEntity::Section(e) => e.to_fields(),
            AdminEntity::ProblemType(e) => e.to_fields(),
            AdminEntity::Message(e) => e.to_fields(),
        }
    }

    /// 列表和下拉框中显示的名称
    pub fn label(&self) -> String {
        match self {
            AdminEntity::Semester(e) => e.title(),
            AdminEntity::Professor(e) => e.full_name(),
            AdminEntity::Course(e) => e.title(),
            AdminEntity::Section(e) => e.describe(None),
            AdminEntity::ProblemType(e) => e.description.clone(),
            AdminEntity::Message(e) => e.message.clone(),
        }
    }
}
