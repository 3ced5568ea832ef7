use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuizService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::quizzes::responses::QuizListResponse;
use crate::models::users::UserRole;
use crate::services::{storage_error_response, unauthorized};

pub async fn list_quizzes(
    service: &QuizService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(unauthorized());
    };

    // 管理员查看全部测验
    let owner = (user.role != UserRole::Admin).then_some(user.id);

    match storage.list_quizzes(owner).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            QuizListResponse { items },
            "Quizzes retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response("List quizzes", e)),
    }
}
