use tracing::info;

use super::TutorService;
use crate::errors::{PortalError, Result};
use crate::models::auth::Caller;
use crate::models::tutors::{
    entities::Tutor, requests::TutorSaveRequest, responses::TutorSaveOutcome,
};
use crate::utils::password::hash_password;
use crate::utils::validate::{normalize_email, validate_email, validate_password_simple};

/// 保存辅导员
///
/// 非管理员只能保存自己的记录，不能删除，`is_active`/`is_superuser` 会被忽略。
pub async fn save_tutor(
    service: &TutorService<'_>,
    caller: &Caller,
    mut request: TutorSaveRequest,
) -> Result<TutorSaveOutcome> {
    let current = caller.require_tutor()?;
    let storage = service.storage();

    let email = normalize_email(&request.email);
    if email.is_empty() {
        return Err(PortalError::validation("Email is required"));
    }

    if !caller.is_superuser() {
        if email != current.email {
            return Err(PortalError::forbidden(
                "You may only edit your own tutor record",
            ));
        }
        if request.is_delete() {
            return Err(PortalError::forbidden("Administrator access required"));
        }
        request.strip_privileged();
    }

    if request.is_delete() {
        if !storage.delete_tutor(&email).await? {
            return Err(PortalError::not_found(format!("Tutor {email} not found")));
        }
        info!("Tutor {} deleted by {}", email, current.email);
        return Ok(TutorSaveOutcome::Deleted { email });
    }

    let password_hash = match request.new_password() {
        Some(password) => {
            validate_password_simple(password).map_err(PortalError::validation)?;
            Some(hash_password(password, &service.context().argon2)?)
        }
        None => None,
    };

    let existing = storage.get_tutor(&email).await?;
    match (request.new, existing) {
        (true, Some(_)) => Err(PortalError::validation(format!(
            "Tutor {email} already exists"
        ))),
        (false, None) => Err(PortalError::not_found(format!("Tutor {email} not found"))),
        (true, None) => {
            validate_email(&email).map_err(PortalError::validation)?;
            let mut tutor = Tutor::new(email);
            request.apply_to(&mut tutor);
            if password_hash.is_some() {
                tutor.password_hash = password_hash;
            }

            let courses = request.courses.clone().unwrap_or_default();
            let tutor = storage.create_tutor(&tutor, &courses).await?;
            info!("Tutor {} created by {}", tutor.email, current.email);
            Ok(TutorSaveOutcome::Created { tutor })
        }
        (false, Some(mut tutor)) => {
            request.apply_to(&mut tutor);
            if password_hash.is_some() {
                tutor.password_hash = password_hash;
            }

            let tutor = storage
                .update_tutor(&tutor, request.courses.as_ref())
                .await?
                .ok_or_else(|| PortalError::not_found(format!("Tutor {email} not found")))?;
            info!("Tutor {} updated by {}", tutor.email, current.email);
            Ok(TutorSaveOutcome::Updated { tutor })
        }
    }
}
