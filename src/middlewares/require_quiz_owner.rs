/*!
 * 测验归属校验中间件
 *
 * 必须放在 RequireJWT 之后，用于 `/teacher/quizzes/{quiz_id}` 下的路由。
 * 管理员可以访问任何测验；教师只能访问自己创建的测验，
 * 其他人的测验一律按不存在处理（404），不暴露测验是否存在。
 *
 * ```rust,ignore
 * web::scope("/{quiz_id}")
 *     .wrap(RequireQuizOwner)
 *     .route("", web::get().to(get_quiz))
 * ```
 *
 * 校验通过后测验实体放入请求扩展，处理程序用 `RequireQuizOwner::extract_quiz` 读取。
 */

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
use tracing::{debug, error};

use crate::models::{
    ErrorCode,
    quizzes::Quiz,
    users::{User, UserRole},
};
use crate::storage::Storage;

use super::create_error_response;

#[derive(Clone)]
pub struct RequireQuizOwner;

/// 调用者能否管理该测验
pub fn can_manage_quiz(user: &User, quiz: &Quiz) -> bool {
    user.role == UserRole::Admin || quiz.owner_id == user.id
}

impl<S, B> Transform<S, ServiceRequest> for RequireQuizOwner
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireQuizOwnerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireQuizOwnerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireQuizOwnerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireQuizOwnerMiddleware<S>
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
            // 1. 当前用户
            let user = req.extensions().get::<User>().cloned();
            let Some(user) = user else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Unauthorized: missing user claims",
                    )
                    .map_into_right_body(),
                ));
            };

            // 2. 路径中的 quiz_id
            let Some(quiz_id) = req
                .match_info()
                .get("quiz_id")
                .and_then(|s| s.parse::<i64>().ok())
            else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::BAD_REQUEST,
                        ErrorCode::BadRequest,
                        "Missing or invalid quiz_id",
                    )
                    .map_into_right_body(),
                ));
            };

            // 3. 查询测验
            let Some(storage) = req
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .map(|data| data.get_ref().clone())
            else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorCode::InternalServerError,
                        "Storage not configured",
                    )
                    .map_into_right_body(),
                ));
            };

            let quiz = match storage.get_quiz_by_id(quiz_id).await {
                Ok(quiz) => quiz,
                Err(e) => {
                    error!("Failed to load quiz {}: {}", quiz_id, e);
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "Failed to load quiz",
                        )
                        .map_into_right_body(),
                    ));
                }
            };

            // 4. 不存在或不属于当前教师都返回 404
            match quiz {
                Some(quiz) if can_manage_quiz(&user, &quiz) => {
                    debug!("User {} may manage quiz {}", user.id, quiz.id);
                    req.extensions_mut().insert(quiz);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                _ => Ok(req.into_response(
                    create_error_response(
                        StatusCode::NOT_FOUND,
                        ErrorCode::QuizNotFound,
                        "Quiz not found",
                    )
                    .map_into_right_body(),
                )),
            }
        })
    }
}

impl RequireQuizOwner {
    /// 校验通过的测验，只能在 RequireQuizOwner 保护的路由中使用
    pub fn extract_quiz(req: &actix_web::HttpRequest) -> Option<Quiz> {
        req.extensions().get::<Quiz>().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::UserStatus;

    fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            display_name: None,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn quiz(owner_id: i64) -> Quiz {
        Quiz {
            id: 1,
            owner_id,
            name: "Fractions".to_string(),
            subject_id: 1,
            room_id: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_owner_and_admin_can_manage() {
        assert!(can_manage_quiz(&user(3, UserRole::Teacher), &quiz(3)));
        assert!(can_manage_quiz(&user(9, UserRole::Admin), &quiz(3)));
    }

    #[test]
    fn test_other_teacher_cannot_manage() {
        assert!(!can_manage_quiz(&user(4, UserRole::Teacher), &quiz(3)));
    }
}
