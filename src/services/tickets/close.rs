use tracing::info;

use super::{TicketService, ticket_not_found};
use crate::errors::{PortalError, Result};
use crate::models::auth::Caller;
use crate::models::tickets::{
    entities::{TicketClosure, TransitionOutcome},
    requests::CloseTicketRequest,
};
use crate::utils::validate::normalize_email;

pub async fn close_ticket(
    service: &TicketService<'_>,
    caller: &Caller,
    id: i64,
    request: CloseTicketRequest,
) -> Result<TransitionOutcome> {
    let tutor = caller.require_tutor()?;

    let tutor_email = request
        .tutor_email
        .map(|email| email.map(|e| normalize_email(&e)));
    let assistant_tutor_email = request
        .assistant_tutor_email
        .map(|email| email.map(|e| normalize_email(&e)));

    // 指派的辅导员必须存在且处于启用状态
    for email in [&tutor_email, &assistant_tutor_email]
        .into_iter()
        .flatten()
        .flatten()
    {
        ensure_assignable(service, email).await?;
    }

    let closure = TicketClosure {
        assignment: request.assignment,
        question: request.question,
        tutor_email,
        assistant_tutor_email,
        section_id: request.section_id,
        problem_type_id: request.problem_type_id,
        was_successful: request.was_successful,
        closed_by: tutor.email.clone(),
        closed_at: service.clock().now(),
    };

    let outcome = service
        .storage()
        .close_ticket(id, closure)
        .await?
        .ok_or_else(|| ticket_not_found(id))?;

    info!(
        "Ticket {} closed by {} (successful: {})",
        id, tutor.email, request.was_successful
    );
    Ok(outcome)
}

async fn ensure_assignable(service: &TicketService<'_>, email: &str) -> Result<()> {
    match service.storage().get_tutor(email).await? {
        Some(tutor) if tutor.is_assignable() => Ok(()),
        Some(_) => Err(PortalError::validation(format!(
            "Tutor {email} is inactive and cannot be assigned"
        ))),
        None => Err(PortalError::validation(format!(
            "Tutor {email} does not exist"
        ))),
    }
}
