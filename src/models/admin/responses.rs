use serde::Serialize;
use std::collections::BTreeMap;

use super::catalog::{EntityKind, FieldMap, FieldSpec};
use super::entities::AdminEntity;

#[derive(Debug, Clone, Serialize)]
pub struct AdminIndexEntry {
    pub kind: EntityKind,
    pub slug: &'static str,
    pub title: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminListItem {
    pub id: i64,
    pub label: String,
    pub entity: AdminEntity,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminListResponse {
    pub kind: EntityKind,
    pub title: &'static str,
    pub items: Vec<AdminListItem>,
}

/// 引用字段的可选项
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Choice {
    pub id: i64,
    pub label: String,
}

/// 编辑表单：`id` 为空表示新建
#[derive(Debug, Clone, Serialize)]
pub struct AdminFormResponse {
    pub kind: EntityKind,
    pub title: &'static str,
    pub id: Option<i64>,
    pub fields: &'static [FieldSpec],
    pub values: FieldMap,
    pub choices: BTreeMap<&'static str, Vec<Choice>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdminSaveOutcome {
    Created { entity: AdminEntity },
    Updated { entity: AdminEntity },
    Deleted { kind: EntityKind, id: i64 },
}
