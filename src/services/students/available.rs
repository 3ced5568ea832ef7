use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::taking::responses::AvailableQuizListResponse;
use crate::services::{storage_error_response, unauthorized};

pub async fn list_available_quizzes(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };

    match storage.list_available_quizzes(user_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AvailableQuizListResponse { items },
            "Available quizzes retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response("List available quizzes", e)),
    }
}
