/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>` 中的 access token，
 * 通过后把当前用户放入请求扩展，处理程序用 `RequireJWT::extract_user_claims` 读取。
 *
 * ```rust,ignore
 * web::scope("/api/v1/teacher")
 *     .wrap(RequireJWT)
 *     .route("/quizzes", web::get().to(list_quizzes))
 * ```
 *
 * 用户信息按 token 缓存在 `user:{token}` 键下，避免每个请求都查询数据库。
 * 被停用的用户即使持有有效 token 也会被拒绝。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::{User, UserRole};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

/// 认证失败的原因，决定返回的错误码
#[derive(Debug)]
enum AuthFailure {
    Unauthorized(&'static str),
    Inactive,
    Internal(&'static str),
}

impl AuthFailure {
    fn into_response(self) -> actix_web::HttpResponse {
        match self {
            AuthFailure::Unauthorized(msg) => {
                create_error_response(StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, msg)
            }
            AuthFailure::Inactive => create_error_response(
                StatusCode::FORBIDDEN,
                ErrorCode::UserInactive,
                "User account is not active",
            ),
            AuthFailure::Internal(msg) => create_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                msg,
            ),
        }
    }
}

fn cache_key(token: &str) -> String {
    format!("user:{token}")
}

// 提取并验证 access token，返回对应的用户
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<User, AuthFailure> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or(AuthFailure::Unauthorized(
            "Missing or invalid Authorization header",
        ))?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AuthFailure::Unauthorized("Invalid JWT token")
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
        .ok_or(AuthFailure::Internal("Cache not configured"))?;

    if let CacheResult::Found(json) = cache.get_raw(&cache_key(token)).await {
        match serde_json::from_str::<User>(&json) {
            Ok(user) => return Ok(user),
            Err(_) => {
                cache.remove(&cache_key(token)).await;
                debug!("Dropped undecodable cached user for token");
            }
        }
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or(AuthFailure::Internal("Storage not configured"))?;

    let user_id = claims
        .user_id()
        .ok_or(AuthFailure::Unauthorized("Invalid user ID in JWT"))?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            error!("Failed to load user {} for JWT: {}", user_id, e);
            AuthFailure::Internal("Failed to retrieve user")
        })?
        .ok_or(AuthFailure::Unauthorized("User not found"))?;

    if !user.is_active() {
        return Err(AuthFailure::Inactive);
    }

    if let Ok(user_json) = serde_json::to_string(&user) {
        cache
            .insert_raw(
                cache_key(token),
                user_json,
                AppConfig::get().cache.default_ttl,
            )
            .await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {:?}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(err.into_response().map_into_right_body()))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 当前用户，只能在 RequireJWT 保护的路由中使用
    pub fn extract_user_claims(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions().get::<User>().map(|user| user.role.clone())
    }
}
