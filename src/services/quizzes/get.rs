use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{QuizService, owned_quiz};
use crate::models::quizzes::responses::QuizDetailResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn get_quiz(service: &QuizService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let quiz = match owned_quiz(request) {
        Ok(quiz) => quiz,
        Err(resp) => return Ok(resp),
    };

    let subject = match storage.get_subject_by_id(quiz.subject_id).await {
        Ok(Some(subject)) => subject,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubjectNotFound,
                "Subject not found",
            )));
        }
        Err(e) => return Ok(storage_error_response("Get quiz", e)),
    };

    match storage.list_question_summaries(quiz.id).await {
        Ok(questions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            QuizDetailResponse {
                quiz,
                subject,
                questions,
            },
            "Quiz retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response("Get quiz", e)),
    }
}
