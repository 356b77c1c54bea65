use super::TutorService;
use crate::errors::Result;
use crate::models::auth::Caller;
use crate::models::tutors::entities::Tutor;

pub async fn list_tutors(service: &TutorService<'_>, caller: &Caller) -> Result<Vec<Tutor>> {
    caller.require_superuser()?;
    service.storage().list_tutors().await
}
