use crate::errors::Result;
use crate::models::auth::Caller;
use crate::models::status::responses::StatusBoard;
use crate::runtime::AppContext;

/// 展示中课程的实时状态和当天公告；已登录的辅导员还能看到待处理工单
pub async fn status_board(ctx: &AppContext, caller: &Caller) -> Result<StatusBoard> {
    let today = ctx.clock.today();

    let courses = ctx.storage.course_statuses(today).await?;
    let messages = ctx.storage.active_messages(today).await?;
    let open_tickets = if caller.is_authenticated() {
        Some(ctx.storage.list_open_tickets().await?)
    } else {
        None
    };

    Ok(StatusBoard {
        courses,
        messages,
        open_tickets,
    })
}
