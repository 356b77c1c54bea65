pub mod board;

use crate::errors::Result;
use crate::models::auth::Caller;
use crate::models::status::responses::StatusBoard;
use crate::runtime::AppContext;

pub struct StatusService<'a> {
    ctx: &'a AppContext,
}

impl<'a> StatusService<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    // 公开状态页
    pub async fn board(&self, caller: &Caller) -> Result<StatusBoard> {
        board::status_board(self.ctx, caller).await
    }
}
