use crate::errors::{PortalError, Result};
use crate::models::admin::{catalog::EntityKind, entities::AdminEntity};
use crate::models::auth::Caller;
use crate::models::reports::{requests::ReportQuery, responses::ReportPage};
use crate::models::tickets::responses::TicketDetail;
use crate::runtime::AppContext;

/// 按查询参数筛选工单；空参数不参与筛选
pub(crate) async fn filtered_tickets(
    ctx: &AppContext,
    caller: &Caller,
    query: &ReportQuery,
) -> Result<Vec<TicketDetail>> {
    caller.require_superuser()?;
    let filter = query.parse()?;
    ctx.storage.filter_tickets(filter).await
}

pub async fn report_page(
    ctx: &AppContext,
    caller: &Caller,
    query: &ReportQuery,
) -> Result<ReportPage> {
    let tickets = filtered_tickets(ctx, caller, query).await?;

    let semesters = ctx
        .storage
        .list_entities(EntityKind::Semester)
        .await?
        .into_iter()
        .filter_map(|entity| match entity {
            AdminEntity::Semester(semester) => Some(semester),
            _ => None,
        })
        .collect();
    let courses = ctx
        .storage
        .list_entities(EntityKind::Course)
        .await?
        .into_iter()
        .filter_map(|entity| match entity {
            AdminEntity::Course(course) => Some(course),
            _ => None,
        })
        .collect();

    Ok(ReportPage {
        tickets,
        semesters,
        courses,
    })
}

pub async fn report_ticket(ctx: &AppContext, caller: &Caller, id: i64) -> Result<TicketDetail> {
    caller.require_superuser()?;
    ctx.storage
        .get_ticket_detail(id)
        .await?
        .ok_or_else(|| PortalError::not_found(format!("Ticket {id} not found")))
}
