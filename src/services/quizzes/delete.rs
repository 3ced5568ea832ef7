use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{QuizService, owned_quiz};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn delete_quiz(
    service: &QuizService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let quiz = match owned_quiz(request) {
        Ok(quiz) => quiz,
        Err(resp) => return Ok(resp),
    };

    // 题目、选项、小组与完成记录随测验级联删除
    match storage.delete_quiz(quiz.id).await {
        Ok(true) => {
            info!("Quiz {} deleted", quiz.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Quiz deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuizNotFound,
            "Quiz not found",
        ))),
        Err(e) => Ok(storage_error_response("Delete quiz", e)),
    }
}
