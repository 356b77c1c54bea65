use crate::errors::Result;
use crate::models::admin::{catalog::EntityKind, responses::AdminIndexEntry};
use crate::models::auth::Caller;

pub fn admin_index(caller: &Caller) -> Result<Vec<AdminIndexEntry>> {
    caller.require_superuser()?;

    Ok(EntityKind::ALL
        .into_iter()
        .map(|kind| AdminIndexEntry {
            kind,
            slug: kind.slug(),
            title: kind.title(),
        })
        .collect())
}
