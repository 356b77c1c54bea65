use super::AdminService;
use crate::errors::Result;
use crate::models::admin::{
    catalog::EntityKind,
    responses::{AdminListItem, AdminListResponse},
};
use crate::models::auth::Caller;

pub async fn list_entities(
    service: &AdminService<'_>,
    caller: &Caller,
    kind: EntityKind,
) -> Result<AdminListResponse> {
    caller.require_superuser()?;

    let items = service
        .storage()
        .list_entities(kind)
        .await?
        .into_iter()
        .map(|entity| AdminListItem {
            id: entity.id(),
            label: entity.label(),
            entity,
        })
        .collect();

    Ok(AdminListResponse {
        kind,
        title: kind.title(),
        items,
    })
}
