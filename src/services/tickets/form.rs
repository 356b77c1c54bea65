use super::TicketService;
use crate::errors::Result;
use crate::models::admin::catalog::EntityKind;
use crate::models::admin::entities::AdminEntity;
use crate::models::auth::Caller;
use crate::models::tickets::responses::TicketFormResponse;

/// 课程、问题类型，以及（关闭工单时）可指派的辅导员
async fn form_choices(
    service: &TicketService<'_>,
    with_tutors: bool,
) -> Result<TicketFormResponse> {
    let storage = service.storage();
    let today = service.clock().today();

    let courses = storage.open_courses(today).await?;
    let problems = storage
        .list_entities(EntityKind::ProblemType)
        .await?
        .into_iter()
        .filter_map(|entity| match entity {
            AdminEntity::ProblemType(problem) => Some(problem),
            _ => None,
        })
        .collect();
    let tutors = if with_tutors {
        storage
            .list_tutors()
            .await?
            .into_iter()
            .filter(|t| t.is_assignable())
            .collect()
    } else {
        Vec::new()
    };

    Ok(TicketFormResponse {
        ticket: None,
        courses,
        problems,
        tutors,
    })
}

pub async fn open_form(service: &TicketService<'_>) -> Result<TicketFormResponse> {
    form_choices(service, false).await
}

pub async fn close_form(
    service: &TicketService<'_>,
    caller: &Caller,
    id: i64,
) -> Result<TicketFormResponse> {
    let ticket = service.detail(caller, id).await?;
    Ok(TicketFormResponse {
        ticket: Some(ticket),
        ..form_choices(service, true).await?
    })
}
