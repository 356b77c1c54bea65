pub mod edit;
pub mod index;
pub mod list;
pub mod save;

use std::sync::Arc;

use crate::errors::{PortalError, Result};
use crate::models::admin::{
    catalog::{EntityKind, RawForm},
    responses::{AdminFormResponse, AdminIndexEntry, AdminListResponse, AdminSaveOutcome},
};
use crate::models::auth::Caller;
use crate::runtime::AppContext;
use crate::storage::Storage;

/// 六种管理实体共用的增删改查流程，只对管理员开放
pub struct AdminService<'a> {
    ctx: &'a AppContext,
}

impl<'a> AdminService<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.ctx.storage
    }

    // 可管理的实体种类
    pub fn index(&self, caller: &Caller) -> Result<Vec<AdminIndexEntry>> {
        index::admin_index(caller)
    }

    // 按默认排序列出实体
    pub async fn list(&self, caller: &Caller, kind: EntityKind) -> Result<AdminListResponse> {
        list::list_entities(self, caller, kind).await
    }

    // 编辑表单，id 为空表示新建
    pub async fn edit(
        &self,
        caller: &Caller,
        kind: EntityKind,
        id: Option<i64>,
    ) -> Result<AdminFormResponse> {
        edit::edit_entity(self, caller, kind, id).await
    }

    // 保存或删除
    pub async fn save(
        &self,
        caller: &Caller,
        kind: EntityKind,
        form: RawForm,
    ) -> Result<AdminSaveOutcome> {
        save::save_entity(self, caller, kind, form).await
    }
}

pub(crate) fn entity_not_found(kind: EntityKind, id: i64) -> PortalError {
    PortalError::not_found(format!("{} #{id} not found", kind.title()))
}
