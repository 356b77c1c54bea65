use tracing::info;

use super::{TicketService, ticket_not_found};
use crate::errors::Result;
use crate::models::auth::Caller;
use crate::models::tickets::entities::TransitionOutcome;

/// 重新打开已关闭的工单，保留原认领人
pub async fn reopen_ticket(
    service: &TicketService<'_>,
    caller: &Caller,
    id: i64,
) -> Result<TransitionOutcome> {
    let tutor = caller.require_tutor()?;

    let outcome = service
        .storage()
        .reopen_ticket(id)
        .await?
        .ok_or_else(|| ticket_not_found(id))?;

    if outcome.applied() {
        info!("Ticket {} reopened by {}", id, tutor.email);
    } else {
        info!(
            "Ticket {} is {}, reopen by {} not applied",
            id,
            outcome.ticket().status,
            tutor.email
        );
    }
    Ok(outcome)
}
