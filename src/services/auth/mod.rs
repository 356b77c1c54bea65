pub mod login;
pub mod me;

use crate::errors::Result;
use crate::models::auth::{Caller, CallerResponse, LoginRequest, LoginResponse};
use crate::runtime::AppContext;

pub struct AuthService<'a> {
    ctx: &'a AppContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    // 登录验证
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        login::handle_login(self.ctx, request).await
    }

    // 当前调用者
    pub fn me(&self, caller: &Caller) -> Result<CallerResponse> {
        me::current_caller(caller)
    }
}
