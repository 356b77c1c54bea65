use tracing::info;

use super::{AdminService, entity_not_found};
use crate::errors::{PortalError, Result};
use crate::models::admin::{
    catalog::{EntityKind, RawForm, coerce_form},
    requests::{SaveAction, form_id},
    responses::AdminSaveOutcome,
};
use crate::models::auth::Caller;

/// 保存表单：`action=delete` 删除，否则有 id 更新、无 id 新建
pub async fn save_entity(
    service: &AdminService<'_>,
    caller: &Caller,
    kind: EntityKind,
    form: RawForm,
) -> Result<AdminSaveOutcome> {
    let admin = caller.require_superuser()?;
    let storage = service.storage();
    let id = form_id(&form)?;

    match SaveAction::from_form(&form) {
        SaveAction::Delete => {
            let id = id.ok_or_else(|| PortalError::validation("An id is required to delete"))?;
            if !storage.delete_entity(kind, id).await? {
                return Err(entity_not_found(kind, id));
            }
            info!("{} #{} deleted by {}", kind, id, admin.email);
            Ok(AdminSaveOutcome::Deleted { kind, id })
        }
        SaveAction::Save => {
            let fields = coerce_form(kind, &form)?;
            match id {
                Some(id) => {
                    let entity = storage
                        .update_entity(kind, id, fields)
                        .await?
                        .ok_or_else(|| entity_not_found(kind, id))?;
                    info!("{} #{} updated by {}", kind, id, admin.email);
                    Ok(AdminSaveOutcome::Updated { entity })
                }
                None => {
                    let entity = storage.create_entity(kind, fields).await?;
                    info!("{} #{} created by {}", kind, entity.id(), admin.email);
                    Ok(AdminSaveOutcome::Created { entity })
                }
            }
        }
    }
}
