use std::collections::BTreeSet;

use super::TutorService;
use crate::errors::{PortalError, Result};
use crate::models::admin::{catalog::EntityKind, entities::AdminEntity};
use crate::models::auth::Caller;
use crate::models::tutors::responses::TutorFormResponse;
use crate::utils::validate::normalize_email;

pub async fn edit_tutor(
    service: &TutorService<'_>,
    caller: &Caller,
    email: Option<&str>,
) -> Result<TutorFormResponse> {
    let current = caller.require_tutor()?;
    let storage = service.storage();

    let courses = storage
        .list_entities(EntityKind::Course)
        .await?
        .into_iter()
        .filter_map(|entity| match entity {
            AdminEntity::Course(course) => Some(course),
            _ => None,
        })
        .collect();

    let Some(email) = email.map(normalize_email).filter(|e| !e.is_empty()) else {
        caller.require_superuser()?;
        return Ok(TutorFormResponse {
            tutor: None,
            courses,
            assigned: BTreeSet::new(),
        });
    };

    if !caller.is_superuser() && email != current.email {
        return Err(PortalError::forbidden(
            "You may only edit your own tutor record",
        ));
    }

    let tutor = storage
        .get_tutor(&email)
        .await?
        .ok_or_else(|| PortalError::not_found(format!("Tutor {email} not found")))?;
    let assigned = storage.tutor_course_ids(&email).await?;

    Ok(TutorFormResponse {
        tutor: Some(tutor),
        courses,
        assigned,
    })
}
