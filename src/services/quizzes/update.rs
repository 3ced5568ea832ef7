use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::create::check_quiz_links;
use super::{QuizService, owned_quiz};
use crate::models::quizzes::requests::UpdateQuizRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::utils::validate::validate_required_text;

pub async fn update_quiz(
    service: &QuizService,
    request: &HttpRequest,
    mut update: UpdateQuizRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let quiz = match owned_quiz(request) {
        Ok(quiz) => quiz,
        Err(resp) => return Ok(resp),
    };

    if let Some(name) = &update.name {
        match validate_required_text(name, "Quiz name is required") {
            Ok(name) => update.name = Some(name.to_string()),
            Err(msg) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::QuizInvalid, msg)));
            }
        }
    }

    if update.clear_room && update.room_id.is_some() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::QuizInvalid,
            "room_id and clear_room cannot be used together",
        )));
    }

    if let Err(resp) = check_quiz_links(&storage, update.subject_id, update.room_id).await {
        return Ok(resp);
    }

    match storage.update_quiz(quiz.id, update).await {
        Ok(Some(updated)) => {
            info!("Quiz {} updated", updated.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Quiz updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuizNotFound,
            "Quiz not found",
        ))),
        Err(e) => Ok(storage_error_response("Update quiz", e)),
    }
}
