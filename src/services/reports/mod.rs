pub mod export;
pub mod list;

use crate::errors::Result;
use crate::models::auth::Caller;
use crate::models::reports::{requests::ReportQuery, responses::ReportPage};
use crate::models::tickets::responses::TicketDetail;
use crate::runtime::AppContext;

/// 报表筛选和导出，只对管理员开放
pub struct ReportService<'a> {
    ctx: &'a AppContext,
}

impl<'a> ReportService<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    // 报表页面：筛选结果和筛选表单的选项
    pub async fn reports(&self, caller: &Caller, query: &ReportQuery) -> Result<ReportPage> {
        list::report_page(self.ctx, caller, query).await
    }

    // 导出 CSV
    pub async fn export_csv(&self, caller: &Caller, query: &ReportQuery) -> Result<Vec<u8>> {
        export::export_csv(self.ctx, caller, query).await
    }

    // 报表中的单个工单
    pub async fn ticket(&self, caller: &Caller, id: i64) -> Result<TicketDetail> {
        list::report_ticket(self.ctx, caller, id).await
    }
}
