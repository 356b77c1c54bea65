//! 报表导出

use tracing::info;

use super::list::filtered_tickets;
use crate::errors::{PortalError, Result};
use crate::models::auth::Caller;
use crate::models::reports::{
    requests::ReportQuery,
    responses::{REPORT_HEADERS, report_row},
};
use crate::runtime::AppContext;

/// 一行表头加每张工单一行，17 列
pub async fn export_csv(ctx: &AppContext, caller: &Caller, query: &ReportQuery) -> Result<Vec<u8>> {
    let tickets = filtered_tickets(ctx, caller, query).await?;

    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(REPORT_HEADERS)?;
    for detail in &tickets {
        wtr.write_record(report_row(detail))?;
    }

    let data = wtr
        .into_inner()
        .map_err(|e| PortalError::serialization(format!("CSV 生成失败: {e}")))?;

    info!(
        "Report exported by {} ({} tickets)",
        caller.email().unwrap_or_default(),
        tickets.len()
    );
    Ok(data)
}
