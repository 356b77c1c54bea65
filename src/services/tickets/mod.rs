pub mod board;
pub mod claim;
pub mod close;
pub mod form;
pub mod open;
pub mod reopen;

use std::sync::Arc;

use crate::errors::{PortalError, Result};
use crate::models::auth::Caller;
use crate::models::tickets::{
    entities::{Ticket, TransitionOutcome},
    requests::{CloseTicketRequest, OpenTicketRequest},
    responses::{TicketBoard, TicketDetail, TicketFormResponse},
};
use crate::runtime::AppContext;
use crate::storage::Storage;
use crate::utils::Clock;

/// 工单状态机：提交、认领、关闭、重新打开
pub struct TicketService<'a> {
    ctx: &'a AppContext,
}

impl<'a> TicketService<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.ctx.storage
    }

    pub(crate) fn clock(&self) -> &Arc<dyn Clock> {
        &self.ctx.clock
    }

    // 学生提交工单
    pub async fn open(&self, request: OpenTicketRequest) -> Result<Ticket> {
        open::open_ticket(self, request).await
    }

    // 认领工单
    pub async fn claim(&self, caller: &Caller, id: i64) -> Result<TransitionOutcome> {
        claim::claim_ticket(self, caller, id).await
    }

    // 关闭工单
    pub async fn close(
        &self,
        caller: &Caller,
        id: i64,
        request: CloseTicketRequest,
    ) -> Result<TransitionOutcome> {
        close::close_ticket(self, caller, id, request).await
    }

    // 重新打开工单
    pub async fn reopen(&self, caller: &Caller, id: i64) -> Result<TransitionOutcome> {
        reopen::reopen_ticket(self, caller, id).await
    }

    // 今天的工单看板
    pub async fn board(&self, caller: &Caller) -> Result<TicketBoard> {
        board::ticket_board(self, caller).await
    }

    // 单个工单详情
    pub async fn detail(&self, caller: &Caller, id: i64) -> Result<TicketDetail> {
        board::ticket_detail(self, caller, id).await
    }

    // 提交工单表单的选项
    pub async fn open_form(&self) -> Result<TicketFormResponse> {
        form::open_form(self).await
    }

    // 关闭工单表单：工单详情加上可选项
    pub async fn close_form(&self, caller: &Caller, id: i64) -> Result<TicketFormResponse> {
        form::close_form(self, caller, id).await
    }
}

pub(crate) fn ticket_not_found(id: i64) -> PortalError {
    PortalError::not_found(format!("Ticket {id} not found"))
}
