use std::collections::BTreeMap;

use super::{AdminService, entity_not_found};
use crate::errors::Result;
use crate::models::admin::{
    catalog::{EntityKind, FieldMap, FieldType, FieldValue, fields_for},
    responses::{AdminFormResponse, Choice},
};
use crate::models::auth::Caller;

/// 新建表单的初始值：复选框为 false，其余为空
fn blank_values(kind: EntityKind) -> FieldMap {
    fields_for(kind)
        .iter()
        .map(|spec| {
            let value = match spec.field_type {
                FieldType::Boolean => FieldValue::Boolean(false),
                _ => FieldValue::Null,
            };
            (spec.name, value)
        })
        .collect()
}

pub async fn edit_entity(
    service: &AdminService<'_>,
    caller: &Caller,
    kind: EntityKind,
    id: Option<i64>,
) -> Result<AdminFormResponse> {
    caller.require_superuser()?;
    let storage = service.storage();

    let values = match id {
        Some(id) => storage
            .get_entity(kind, id)
            .await?
            .ok_or_else(|| entity_not_found(kind, id))?
            .fields(),
        None => blank_values(kind),
    };

    // 引用字段的下拉选项
    let mut choices = BTreeMap::new();
    for spec in fields_for(kind) {
        if let FieldType::Reference(target) = spec.field_type {
            let options = storage
                .list_entities(target)
                .await?
                .into_iter()
                .map(|entity| Choice {
                    id: entity.id(),
                    label: entity.label(),
                })
                .collect();
            choices.insert(spec.name, options);
        }
    }

    Ok(AdminFormResponse {
        kind,
        title: kind.title(),
        id,
        fields: fields_for(kind),
        values,
        choices,
    })
}
