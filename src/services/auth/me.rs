use crate::errors::Result;
use crate::models::auth::{Caller, CallerResponse};

pub fn current_caller(caller: &Caller) -> Result<CallerResponse> {
    let tutor = caller.require_tutor()?;
    Ok(CallerResponse {
        tutor: tutor.clone(),
    })
}
