use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::progress::progress_percent;
use super::{StudentService, quiz_already_taken, quiz_not_found};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::taking::responses::{AnswerOption, TakeStateResponse};
use crate::services::{storage_error_response, unauthorized};

pub async fn get_take_state(
    service: &StudentService,
    request: &HttpRequest,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };

    let quiz = match storage.get_quiz_by_id(quiz_id).await {
        Ok(Some(quiz)) => quiz,
        Ok(None) => return Ok(quiz_not_found()),
        Err(e) => return Ok(storage_error_response("Get take state", e)),
    };

    match storage.get_taken_quiz(user_id, quiz.id).await {
        Ok(Some(_)) => return Ok(quiz_already_taken()),
        Ok(None) => {}
        Err(e) => return Ok(storage_error_response("Get take state", e)),
    }

    let state = match storage.get_take_progress(user_id, quiz.id).await {
        Ok(state) => state,
        Err(e) => return Ok(storage_error_response("Get take state", e)),
    };

    // 没有题目的测验不可作答
    let Some(question) = state.question else {
        return Ok(quiz_not_found());
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TakeStateResponse {
            quiz_id: quiz.id,
            quiz_name: quiz.name,
            question_id: question.id,
            question_text: question.text,
            answers: state
                .answers
                .into_iter()
                .map(|a| AnswerOption {
                    id: a.id,
                    text: a.text,
                })
                .collect(),
            answered: state.answered,
            total: state.total,
            progress: progress_percent(state.answered, state.total),
        },
        "Current question retrieved successfully",
    )))
}
