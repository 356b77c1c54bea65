//! 当前请求的调用者
//!
//! 由身份识别中间件写入请求扩展。只有令牌有效且对应一个启用中的辅导员时才算已认证，
//! 否则为匿名调用者；权限检查在服务层完成。

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::errors::{PortalError, Result};
use crate::models::tutors::entities::Tutor;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Caller {
    tutor: Option<Tutor>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self { tutor: None }
    }

    /// 未启用的辅导员按匿名处理
    pub fn from_tutor(tutor: Tutor) -> Self {
        if tutor.is_active {
            Self { tutor: Some(tutor) }
        } else {
            Self::anonymous()
        }
    }

    pub fn tutor(&self) -> Option<&Tutor> {
        self.tutor.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tutor.is_some()
    }

    pub fn is_superuser(&self) -> bool {
        self.tutor.as_ref().is_some_and(|t| t.is_superuser)
    }

    pub fn email(&self) -> Option<&str> {
        self.tutor.as_ref().map(|t| t.email.as_str())
    }

    pub fn require_tutor(&self) -> Result<&Tutor> {
        self.tutor
            .as_ref()
            .ok_or_else(|| PortalError::forbidden("Login required"))
    }

    pub fn require_superuser(&self) -> Result<&Tutor> {
        let tutor = self.require_tutor()?;
        if tutor.is_superuser {
            Ok(tutor)
        } else {
            Err(PortalError::forbidden("Administrator access required"))
        }
    }
}

impl FromRequest for Caller {
    type Error = actix_web::Error;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(req
            .extensions()
            .get::<Caller>()
            .cloned()
            .unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_tutor_is_anonymous() {
        let mut tutor = Tutor::new("t@example.edu");
        tutor.is_active = false;
        let caller = Caller::from_tutor(tutor);
        assert!(!caller.is_authenticated());
        assert!(matches!(
            caller.require_tutor(),
            Err(PortalError::Forbidden(_))
        ));
    }

    #[test]
    fn test_superuser_gate() {
        let tutor = Tutor::new("t@example.edu");
        let caller = Caller::from_tutor(tutor.clone());
        assert!(caller.require_tutor().is_ok());
        assert!(matches!(
            caller.require_superuser(),
            Err(PortalError::Forbidden(_))
        ));

        let admin = Caller::from_tutor(Tutor {
            is_superuser: true,
            ..tutor
        });
        assert!(admin.require_superuser().is_ok());
    }
}
