use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::progress::progress_percent;
use super::{StudentService, quiz_already_taken, quiz_not_found};
use crate::errors::ClassroomError;
use crate::middlewares::RequireJWT;
use crate::models::taking::SubmitOutcome;
use crate::models::taking::requests::SubmitAnswerRequest;
use crate::models::taking::responses::SubmitAnswerResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{storage_error_response, unauthorized};

pub async fn submit_answer(
    service: &StudentService,
    request: &HttpRequest,
    quiz_id: i64,
    submit: SubmitAnswerRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };

    match storage.get_quiz_by_id(quiz_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(quiz_not_found()),
        Err(e) => return Ok(storage_error_response("Submit answer", e)),
    }

    match storage
        .submit_answer(user_id, quiz_id, submit.answer_id)
        .await
    {
        Ok(SubmitOutcome::InProgress { answered, total }) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubmitAnswerResponse {
                    completed: false,
                    progress: Some(progress_percent(answered, total)),
                    score: None,
                },
                "Answer saved",
            )))
        }
        Ok(SubmitOutcome::Completed(taken)) => {
            info!(
                "Student {} completed quiz {} with score {}",
                user_id, quiz_id, taken.score
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubmitAnswerResponse {
                    completed: true,
                    progress: None,
                    score: Some(taken.score),
                },
                format!(
                    "Congratulations! You completed the quiz with success! You scored {} points.",
                    taken.score
                ),
            )))
        }
        Err(ClassroomError::Conflict(_)) => Ok(quiz_already_taken()),
        Err(ClassroomError::NotFound(_)) => Ok(quiz_not_found()),
        Err(ClassroomError::Validation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::AnswerInvalid, msg))),
        Err(e) => Ok(storage_error_response("Submit answer", e)),
    }
}
