//! 管理实体存储实现
//!
//! 六种实体共用一套增删改查，通过 `with_entity!` 按 [`EntityKind`] 选择对应的 SeaORM 实体模块。

use std::collections::HashMap;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, TransactionTrait,
};

use super::{SeaOrmStorage, map_db_err};
use crate::entity::{
    can_tutor, courses, messages, problem_types, professors, sections, semesters, tickets,
};
use crate::errors::{PortalError, Result};
use crate::models::admin::catalog::{
    EntityKind, FieldMap, FieldType, FieldValue, SectionSortKey, compare_fields, default_order,
    fields_for,
};
use crate::models::admin::entities::AdminEntity;

/// 把 `$m` 绑定到 `$kind` 对应的实体模块后执行 `$body`
macro_rules! with_entity {
    ($kind:expr, $m:ident => $body:expr) => {
        match $kind {
            EntityKind::Semester => {
                use semesters as $m;
                $body
            }
            EntityKind::Professor => {
                use professors as $m;
                $body
            }
            EntityKind::Course => {
                use courses as $m;
                $body
            }
            EntityKind::Section => {
                use sections as $m;
                $body
            }
            EntityKind::ProblemType => {
                use problem_types as $m;
                $body
            }
            EntityKind::Message => {
                use messages as $m;
                $body
            }
        }
    };
}

/// 按 id 读取实体
async fn find_entity<C: ConnectionTrait>(
    conn: &C,
    kind: EntityKind,
    id: i64,
) -> Result<Option<AdminEntity>> {
    let entity = with_entity!(kind, m => m::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| map_db_err(&format!("查询{kind}失败"), e))?
        .map(m::Model::into_admin));
    Ok(entity)
}

/// 引用字段指向的行必须存在
async fn check_references<C: ConnectionTrait>(
    conn: &C,
    kind: EntityKind,
    fields: &FieldMap,
) -> Result<()> {
    for spec in fields_for(kind) {
        let FieldType::Reference(target) = spec.field_type else {
            continue;
        };
        if let Some(FieldValue::Integer(ref_id)) = fields.get(spec.name)
            && find_entity(conn, target, *ref_id).await?.is_none()
        {
            return Err(PortalError::validation(format!(
                "{} #{ref_id} does not exist",
                spec.label
            )));
        }
    }
    Ok(())
}

/// 删除前把引用该行的外键置空
async fn detach_references<C: ConnectionTrait>(conn: &C, kind: EntityKind, id: i64) -> Result<()> {
    let context = format!("解除{kind}引用失败");
    match kind {
        EntityKind::Semester => {
            sections::Entity::update_many()
                .col_expr(sections::Column::SemesterId, Expr::value(Option::<i64>::None))
                .filter(sections::Column::SemesterId.eq(id))
                .exec(conn)
                .await
                .map_err(|e| map_db_err(&context, e))?;
        }
        EntityKind::Professor => {
            sections::Entity::update_many()
                .col_expr(sections::Column::ProfessorId, Expr::value(Option::<i64>::None))
                .filter(sections::Column::ProfessorId.eq(id))
                .exec(conn)
                .await
                .map_err(|e| map_db_err(&context, e))?;
        }
        EntityKind::ProblemType => {
            tickets::Entity::update_many()
                .col_expr(tickets::Column::ProblemTypeId, Expr::value(Option::<i64>::None))
                .filter(tickets::Column::ProblemTypeId.eq(id))
                .exec(conn)
                .await
                .map_err(|e| map_db_err(&context, e))?;
        }
        EntityKind::Section => {
            tickets::Entity::update_many()
                .col_expr(tickets::Column::SectionId, Expr::value(Option::<i64>::None))
                .filter(tickets::Column::SectionId.eq(id))
                .exec(conn)
                .await
                .map_err(|e| map_db_err(&context, e))?;
        }
        EntityKind::Course => {
            // 课程拥有班次：班次随课程删除，工单只保留空的班次引用
            let section_ids: Vec<i64> = sections::Entity::find()
                .filter(sections::Column::CourseId.eq(id))
                .all(conn)
                .await
                .map_err(|e| map_db_err(&context, e))?
                .into_iter()
                .map(|s| s.id)
                .collect();

            if !section_ids.is_empty() {
                tickets::Entity::update_many()
                    .col_expr(tickets::Column::SectionId, Expr::value(Option::<i64>::None))
                    .filter(tickets::Column::SectionId.is_in(section_ids))
                    .exec(conn)
                    .await
                    .map_err(|e| map_db_err(&context, e))?;
            }

            sections::Entity::delete_many()
                .filter(sections::Column::CourseId.eq(id))
                .exec(conn)
                .await
                .map_err(|e| map_db_err(&context, e))?;

            can_tutor::Entity::delete_many()
                .filter(can_tutor::Column::CourseId.eq(id))
                .exec(conn)
                .await
                .map_err(|e| map_db_err(&context, e))?;
        }
        EntityKind::Message => {}
    }
    Ok(())
}

impl SeaOrmStorage {
    /// 通过 ID 获取实体
    pub(crate) async fn get_entity_impl(
        &self,
        kind: EntityKind,
        id: i64,
    ) -> Result<Option<AdminEntity>> {
        find_entity(&self.db, kind, id).await
    }

    /// 按默认排序列出实体
    pub(crate) async fn list_entities_impl(&self, kind: EntityKind) -> Result<Vec<AdminEntity>> {
        if kind == EntityKind::Section {
            return self.list_sections_sorted().await;
        }

        let entities: Vec<AdminEntity> = with_entity!(kind, m => m::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(&format!("获取{kind}列表失败"), e))?
            .into_iter()
            .map(m::Model::into_admin)
            .collect());

        let order = default_order(kind);
        let mut keyed: Vec<(FieldMap, AdminEntity)> =
            entities.into_iter().map(|e| (e.fields(), e)).collect();
        keyed.sort_by(|(a, _), (b, _)| compare_fields(a, b, order));

        Ok(keyed.into_iter().map(|(_, e)| e).collect())
    }

    /// 班次：学期开始日期倒序，然后课程号、班次号
    async fn list_sections_sorted(&self) -> Result<Vec<AdminEntity>> {
        let context = "获取班次列表失败";
        let semester_starts: HashMap<i64, chrono::NaiveDate> = semesters::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(context, e))?
            .into_iter()
            .map(|s| (s.id, s.start_date))
            .collect();
        let course_numbers: HashMap<i64, String> = courses::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(context, e))?
            .into_iter()
            .map(|c| (c.id, c.number))
            .collect();

        let mut keyed: Vec<(SectionSortKey, AdminEntity)> = sections::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(context, e))?
            .into_iter()
            .map(|s| {
                let key = SectionSortKey {
                    semester_start: s
                        .semester_id
                        .and_then(|id| semester_starts.get(&id).copied()),
                    course_number: course_numbers.get(&s.course_id).cloned().unwrap_or_default(),
                    section_number: s.number,
                };
                (key, s.into_admin())
            })
            .collect();
        keyed.sort_by(|(a, _), (b, _)| a.cmp(b));

        Ok(keyed.into_iter().map(|(_, e)| e).collect())
    }

    /// 创建实体
    pub(crate) async fn create_entity_impl(
        &self,
        kind: EntityKind,
        fields: FieldMap,
    ) -> Result<AdminEntity> {
        let context = format!("创建{kind}失败");
        let txn = self.db.begin().await.map_err(|e| map_db_err(&context, e))?;

        check_references(&txn, kind, &fields).await?;

        let entity = with_entity!(kind, m => {
            let mut model = <m::ActiveModel as Default>::default();
            for (name, value) in &fields {
                model.apply_field(name, value)?;
            }
            model
                .insert(&txn)
                .await
                .map_err(|e| map_db_err(&context, e))?
                .into_admin()
        });

        txn.commit().await.map_err(|e| map_db_err(&context, e))?;
        Ok(entity)
    }

    /// 更新实体，只写入与当前值不同的字段
    pub(crate) async fn update_entity_impl(
        &self,
        kind: EntityKind,
        id: i64,
        fields: FieldMap,
    ) -> Result<Option<AdminEntity>> {
        let context = format!("更新{kind}失败");
        let txn = self.db.begin().await.map_err(|e| map_db_err(&context, e))?;

        let entity = with_entity!(kind, m => {
            let Some(existing) = m::Entity::find_by_id(id)
                .one(&txn)
                .await
                .map_err(|e| map_db_err(&context, e))?
            else {
                return Ok(None);
            };

            let current = existing.clone().into_admin().fields();
            let changed: FieldMap = fields
                .into_iter()
                .filter(|(name, value)| current.get(name) != Some(value))
                .collect();

            if changed.is_empty() {
                existing.into_admin()
            } else {
                check_references(&txn, kind, &changed).await?;
                let mut model: m::ActiveModel = existing.into();
                for (name, value) in &changed {
                    model.apply_field(name, value)?;
                }
                model
                    .update(&txn)
                    .await
                    .map_err(|e| map_db_err(&context, e))?
                    .into_admin()
            }
        });

        txn.commit().await.map_err(|e| map_db_err(&context, e))?;
        Ok(Some(entity))
    }

    /// 删除实体
    pub(crate) async fn delete_entity_impl(&self, kind: EntityKind, id: i64) -> Result<bool> {
        let context = format!("删除{kind}失败");
        let txn = self.db.begin().await.map_err(|e| map_db_err(&context, e))?;

        if find_entity(&txn, kind, id).await?.is_none() {
            return Ok(false);
        }

        detach_references(&txn, kind, id).await?;

        let result = with_entity!(kind, m => m::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| map_db_err(&context, e))?);

        txn.commit().await.map_err(|e| map_db_err(&context, e))?;
        Ok(result.rows_affected > 0)
    }
}
