use tracing::info;

use super::TicketService;
use crate::errors::{PortalError, Result};
use crate::models::tickets::{
    entities::Ticket,
    requests::{OpenTicketRequest, clean_text},
};
use crate::utils::validate::{normalize_email, validate_email};

pub async fn open_ticket(service: &TicketService<'_>, request: OpenTicketRequest) -> Result<Ticket> {
    let student_email = normalize_email(&request.student_email);
    if student_email.is_empty() {
        return Err(PortalError::validation("Student email is required"));
    }
    validate_email(&student_email).map_err(PortalError::validation)?;

    if request.section_id.is_none() {
        return Err(PortalError::validation("Section is required"));
    }

    let request = OpenTicketRequest {
        student_email,
        student_fname: clean_text(request.student_fname),
        student_lname: clean_text(request.student_lname),
        assignment: clean_text(request.assignment),
        question: clean_text(request.question),
        ..request
    };

    let ticket = service
        .storage()
        .create_ticket(request, service.clock().now())
        .await?;

    info!(
        "Ticket {} opened by {} for section {:?}",
        ticket.id, ticket.student_email, ticket.section_id
    );
    Ok(ticket)
}
