use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{QuestionService, find_question};
use crate::models::ApiResponse;
use crate::models::questions::responses::QuestionDetailResponse;
use crate::services::quizzes::owned_quiz;
use crate::services::storage_error_response;

pub async fn get_question(
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

    match storage.list_answers(question.id).await {
        Ok(answers) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            QuestionDetailResponse { question, answers },
            "Question retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response("Get question", e)),
    }
}
