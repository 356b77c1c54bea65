use super::{TicketService, ticket_not_found};
use crate::errors::Result;
use crate::models::auth::Caller;
use crate::models::tickets::responses::{TicketBoard, TicketDetail};

/// 今天创建、今天关闭或仍在处理中的工单
pub async fn ticket_board(service: &TicketService<'_>, caller: &Caller) -> Result<TicketBoard> {
    caller.require_tutor()?;

    let since = service.clock().start_of_today();
    let tickets = service.storage().list_board_tickets(since).await?;
    Ok(TicketBoard::from_tickets(tickets))
}

pub async fn ticket_detail(
    service: &TicketService<'_>,
    caller: &Caller,
    id: i64,
) -> Result<TicketDetail> {
    caller.require_tutor()?;

    service
        .storage()
        .get_ticket_detail(id)
        .await?
        .ok_or_else(|| ticket_not_found(id))
}
