use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{QuestionService, find_question};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::quizzes::owned_quiz;
use crate::services::storage_error_response;

pub async fn delete_question(
    service: &QuestionService,
    request: &HttpRequest,
    question_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let quiz = match owned_quiz(request) {
        Ok(quiz) => quiz,
        Err(resp) => return Ok(resp),
    };

    let question = match find_question(&storage, quiz.id, question_id).await {
        Ok(question) => question,
        Err(resp) => return Ok(resp),
    };

    match storage.delete_question(question.id).await {
        Ok(true) => {
            info!("Question {} deleted from quiz {}", question.id, quiz.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Question deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "Question not found",
        ))),
        Err(e) => Ok(storage_error_response("Delete question", e)),
    }
}
