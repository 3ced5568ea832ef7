//! 角色校验
//!
//! 依赖 RequireJWT 先把 `User` 放进请求扩展，因此在 scope 上要先 wrap 本中间件、
//! 再 wrap RequireJWT。请求用户的角色落在允许列表内才放行。

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::{User, UserRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed: Rc<[UserRole]>,
}

impl RequireRole {
    pub fn new(role: &UserRole) -> Self {
        Self {
            allowed: Rc::from(vec![role.clone()]),
        }
    }

    /// 任一角色即可
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            allowed: roles.iter().map(|r| (*r).clone()).collect(),
        }
    }

    fn permits(&self, role: &UserRole) -> bool {
        self.allowed.contains(role)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            rule: self.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    rule: RequireRole,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let user = req.extensions().get::<User>().cloned();

        let rejection = match &user {
            None => Some((
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                "Authentication required",
            )),
            Some(user) if !self.rule.permits(&user.role) => {
                info!("User {} with role {} is not allowed here", user.id, user.role);
                Some((StatusCode::FORBIDDEN, ErrorCode::Forbidden, "Access denied."))
            }
            Some(_) => None,
        };

        Box::pin(async move {
            if let Some((status, code, message)) = rejection {
                let response = create_error_response(status, code, message);
                return Ok(req.into_response(response).map_into_right_body());
            }
            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_roles_admit_admin() {
        let rule = RequireRole::new_any(UserRole::teacher_roles());
        assert!(rule.permits(&UserRole::Teacher));
        assert!(rule.permits(&UserRole::Admin));
        assert!(!rule.permits(&UserRole::Student));
    }

    #[test]
    fn test_single_role() {
        let rule = RequireRole::new(&UserRole::Student);
        assert!(rule.permits(&UserRole::Student));
        assert!(!rule.permits(&UserRole::Admin));
    }
}
