use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QuestionService;
use crate::models::questions::requests::CreateQuestionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::quizzes::owned_quiz;
use crate::services::storage_error_response;
use crate::utils::validate::validate_required_text;

pub async fn add_question(
    service: &QuestionService,
    request: &HttpRequest,
    question: CreateQuestionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let quiz = match owned_quiz(request) {
        Ok(quiz) => quiz,
        Err(resp) => return Ok(resp),
    };

    let text = match validate_required_text(&question.text, "Question text is required") {
        Ok(text) => text,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::QuestionInvalid, msg)));
        }
    };

    match storage.create_question(quiz.id, text).await {
        Ok(question) => {
            info!("Question {} added to quiz {}", question.id, quiz.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(question, "Question added successfully")))
        }
        Err(e) => Ok(storage_error_response("Add question", e)),
    }
}
