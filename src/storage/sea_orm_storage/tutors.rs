use std::collections::BTreeSet;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::{SeaOrmStorage, map_db_err};
use crate::entity::can_tutor;
use crate::entity::prelude::{Courses, Tickets};
use crate::entity::tickets;
use crate::entity::tutors::{ActiveModel, Column, Entity as Tutors};
use crate::errors::Result;
use crate::models::tutors::entities::{Tutor, plan_course_changes};

/// 辅导员当前可以辅导的课程
async fn course_ids_of<C: ConnectionTrait>(conn: &C, email: &str) -> Result<BTreeSet<i64>> {
    let rows = can_tutor::Entity::find()
        .filter(can_tutor::Column::TutorEmail.eq(email))
        .all(conn)
        .await
        .map_err(|e| map_db_err("查询辅导员课程失败", e))?;

    Ok(rows.into_iter().map(|r| r.course_id).collect())
}

/// 把辅导员的课程集合调整为期望集合，不存在的课程被忽略
async fn reconcile_courses<C: ConnectionTrait>(
    conn: &C,
    email: &str,
    desired: &BTreeSet<i64>,
) -> Result<()> {
    let known: BTreeSet<i64> = Courses::find()
        .all(conn)
        .await
        .map_err(|e| map_db_err("获取课程列表失败", e))?
        .into_iter()
        .map(|c| c.id)
        .collect();
    let desired: BTreeSet<i64> = desired.intersection(&known).copied().collect();

    let current = course_ids_of(conn, email).await?;
    let changes = plan_course_changes(&current, &desired);
    if changes.is_empty() {
        return Ok(());
    }

    if !changes.remove.is_empty() {
        can_tutor::Entity::delete_many()
            .filter(can_tutor::Column::TutorEmail.eq(email))
            .filter(can_tutor::Column::CourseId.is_in(changes.remove))
            .exec(conn)
            .await
            .map_err(|e| map_db_err("移除辅导员课程失败", e))?;
    }

    if !changes.add.is_empty() {
        let rows = changes.add.into_iter().map(|course_id| can_tutor::ActiveModel {
            tutor_email: Set(email.to_string()),
            course_id: Set(course_id),
        });
        can_tutor::Entity::insert_many(rows)
            .exec(conn)
            .await
            .map_err(|e| map_db_err("添加辅导员课程失败", e))?;
    }

    Ok(())
}

impl SeaOrmStorage {
    /// 通过邮箱获取辅导员
    pub(crate) async fn get_tutor_impl(&self, email: &str) -> Result<Option<Tutor>> {
        let result = Tutors::find_by_id(email.to_string())
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询辅导员失败", e))?;

        Ok(result.map(|m| m.into_tutor()))
    }

    /// 列出辅导员（姓、名、邮箱排序）
    pub(crate) async fn list_tutors_impl(&self) -> Result<Vec<Tutor>> {
        let tutors = Tutors::find()
            .order_by_asc(Column::Lname)
            .order_by_asc(Column::Fname)
            .order_by_asc(Column::Email)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("获取辅导员列表失败", e))?;

        Ok(tutors.into_iter().map(|m| m.into_tutor()).collect())
    }

    pub(crate) async fn count_tutors_impl(&self) -> Result<u64> {
        Tutors::find()
            .count(&self.db)
            .await
            .map_err(|e| map_db_err("统计辅导员失败", e))
    }

    pub(crate) async fn tutor_course_ids_impl(&self, email: &str) -> Result<BTreeSet<i64>> {
        course_ids_of(&self.db, email).await
    }

    /// 创建辅导员及其课程
    pub(crate) async fn create_tutor_impl(
        &self,
        tutor: &Tutor,
        courses: &BTreeSet<i64>,
    ) -> Result<Tutor> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| map_db_err("创建辅导员失败", e))?;

        let model = ActiveModel {
            email: Set(tutor.email.clone()),
            fname: Set(tutor.fname.clone()),
            lname: Set(tutor.lname.clone()),
            password_hash: Set(tutor.password_hash.clone()),
            is_active: Set(tutor.is_active),
            is_superuser: Set(tutor.is_superuser),
            is_working: Set(tutor.is_working),
        };

        let created = model
            .insert(&txn)
            .await
            .map_err(|e| map_db_err("创建辅导员失败", e))?;

        reconcile_courses(&txn, &created.email, courses).await?;

        txn.commit()
            .await
            .map_err(|e| map_db_err("创建辅导员失败", e))?;

        Ok(created.into_tutor())
    }

    /// 更新辅导员
    pub(crate) async fn update_tutor_impl(
        &self,
        tutor: &Tutor,
        courses: Option<&BTreeSet<i64>>,
    ) -> Result<Option<Tutor>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| map_db_err("更新辅导员失败", e))?;

        let Some(existing) = Tutors::find_by_id(tutor.email.clone())
            .one(&txn)
            .await
            .map_err(|e| map_db_err("查询辅导员失败", e))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.clone().into();
        if existing.fname != tutor.fname {
            model.fname = Set(tutor.fname.clone());
        }
        if existing.lname != tutor.lname {
            model.lname = Set(tutor.lname.clone());
        }
        if existing.password_hash != tutor.password_hash {
            model.password_hash = Set(tutor.password_hash.clone());
        }
        if existing.is_active != tutor.is_active {
            model.is_active = Set(tutor.is_active);
        }
        if existing.is_superuser != tutor.is_superuser {
            model.is_superuser = Set(tutor.is_superuser);
        }
        if existing.is_working != tutor.is_working {
            model.is_working = Set(tutor.is_working);
        }

        let updated = if model.is_changed() {
            model
                .update(&txn)
                .await
                .map_err(|e| map_db_err("更新辅导员失败", e))?
        } else {
            existing
        };

        if let Some(courses) = courses {
            reconcile_courses(&txn, &updated.email, courses).await?;
        }

        txn.commit()
            .await
            .map_err(|e| map_db_err("更新辅导员失败", e))?;

        Ok(Some(updated.into_tutor()))
    }

    /// 删除辅导员，工单上的辅导员引用置空
    pub(crate) async fn delete_tutor_impl(&self, email: &str) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| map_db_err("删除辅导员失败", e))?;

        Tickets::update_many()
            .col_expr(tickets::Column::TutorEmail, Expr::value(Option::<String>::None))
            .filter(tickets::Column::TutorEmail.eq(email))
            .exec(&txn)
            .await
            .map_err(|e| map_db_err("解除工单辅导员失败", e))?;

        Tickets::update_many()
            .col_expr(
                tickets::Column::AssistantTutorEmail,
                Expr::value(Option::<String>::None),
            )
            .filter(tickets::Column::AssistantTutorEmail.eq(email))
            .exec(&txn)
            .await
            .map_err(|e| map_db_err("解除工单助理辅导员失败", e))?;

        can_tutor::Entity::delete_many()
            .filter(can_tutor::Column::TutorEmail.eq(email))
            .exec(&txn)
            .await
            .map_err(|e| map_db_err("删除辅导员课程失败", e))?;

        let result = Tutors::delete_by_id(email.to_string())
            .exec(&txn)
            .await
            .map_err(|e| map_db_err("删除辅导员失败", e))?;

        txn.commit()
            .await
            .map_err(|e| map_db_err("删除辅导员失败", e))?;

        Ok(result.rows_affected > 0)
    }
}
