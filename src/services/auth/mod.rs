pub mod login;
pub mod logout;
pub mod signup;
pub mod token;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::auth::{LoginRequest, StudentSignupRequest, TeacherSignupRequest};
use crate::storage::Storage;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::resolve_storage(&self.storage, request)
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 登录验证
    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    // 教师注册
    pub async fn signup_teacher(
        &self,
        signup_request: TeacherSignupRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        signup::handle_signup_teacher(self, signup_request, request).await
    }

    // 学生注册（同时写入兴趣学科）
    pub async fn signup_student(
        &self,
        signup_request: StudentSignupRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        signup::handle_signup_student(self, signup_request, request).await
    }

    pub async fn logout(&self) -> ActixResult<HttpResponse> {
        logout::handle_logout().await
    }

    // 刷新令牌
    pub async fn refresh_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_refresh_token(self, request).await
    }

    // 验证令牌
    pub async fn verify_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_verify_token(self, request).await
    }

    // 当前用户信息
    pub async fn get_user(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_get_user(self, request).await
    }
}
