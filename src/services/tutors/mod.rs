pub mod edit;
pub mod list;
pub mod save;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::auth::Caller;
use crate::models::tutors::{
    entities::Tutor,
    requests::TutorSaveRequest,
    responses::{TutorFormResponse, TutorSaveOutcome},
};
use crate::runtime::AppContext;
use crate::storage::Storage;

/// 辅导员管理；非管理员只能编辑自己的记录
pub struct TutorService<'a> {
    ctx: &'a AppContext,
}

impl<'a> TutorService<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.ctx.storage
    }

    pub(crate) fn context(&self) -> &AppContext {
        self.ctx
    }

    // 列出辅导员
    pub async fn list(&self, caller: &Caller) -> Result<Vec<Tutor>> {
        list::list_tutors(self, caller).await
    }

    // 编辑表单，email 为空表示新建
    pub async fn edit(&self, caller: &Caller, email: Option<&str>) -> Result<TutorFormResponse> {
        edit::edit_tutor(self, caller, email).await
    }

    // 保存或删除
    pub async fn save(
        &self,
        caller: &Caller,
        request: TutorSaveRequest,
    ) -> Result<TutorSaveOutcome> {
        save::save_tutor(self, caller, request).await
    }
}
