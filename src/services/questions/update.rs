use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::formset::{FormsetLimits, build_answer_changes};
use super::{QuestionService, find_question};
use crate::models::questions::{requests::UpdateQuestionRequest, responses::QuestionDetailResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::quizzes::owned_quiz;
use crate::services::storage_error_response;
use crate::utils::validate::validate_required_text;

pub async fn update_question(
    service: &QuestionService,
    request: &HttpRequest,
    question_id: i64,
    update: UpdateQuestionRequest,
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

    let text = match validate_required_text(&update.text, "Question text is required") {
        Ok(text) => text,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::QuestionInvalid, msg)));
        }
    };

    let existing = match storage.list_answers(question.id).await {
        Ok(answers) => answers,
        Err(e) => return Ok(storage_error_response("Update question", e)),
    };

    // 写库前校验整个表单
    let config = service.get_config();
    let limits = FormsetLimits {
        min_answers: config.quiz.min_answers,
        max_answers: config.quiz.max_answers,
    };
    let changes = match build_answer_changes(&existing, &update.answers, limits) {
        Ok(changes) => changes,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::AnswerFormsetInvalid, msg)));
        }
    };

    match storage
        .save_question_formset(question.id, text, changes)
        .await
    {
        Ok((question, answers)) => {
            info!(
                "Question {} saved with {} answers",
                question.id,
                answers.len()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                QuestionDetailResponse { question, answers },
                "Question updated successfully",
            )))
        }
        Err(e) => Ok(storage_error_response("Update question", e)),
    }
}
