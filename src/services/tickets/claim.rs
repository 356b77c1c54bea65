use tracing::info;

use super::{TicketService, ticket_not_found};
use crate::errors::Result;
use crate::models::auth::Caller;
use crate::models::tickets::entities::TransitionOutcome;

/// 认领工单
///
/// 竞争失败不是错误：返回 `Superseded` 和工单的当前状态。
pub async fn claim_ticket(
    service: &TicketService<'_>,
    caller: &Caller,
    id: i64,
) -> Result<TransitionOutcome> {
    let tutor = caller.require_tutor()?;

    let outcome = service
        .storage()
        .claim_ticket(id, &tutor.email)
        .await?
        .ok_or_else(|| ticket_not_found(id))?;

    if outcome.applied() {
        info!("Ticket {} claimed by {}", id, tutor.email);
    } else {
        info!(
            "Ticket {} is already {}, claim by {} not applied",
            id,
            outcome.ticket().status,
            tutor.email
        );
    }
    Ok(outcome)
}
