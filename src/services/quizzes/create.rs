use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QuizService;
use crate::middlewares::RequireJWT;
use crate::models::quizzes::requests::CreateQuizRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{storage_error_response, unauthorized};
use crate::storage::Storage;
use crate::utils::validate::validate_required_text;

pub async fn create_quiz(
    service: &QuizService,
    request: &HttpRequest,
    mut quiz: CreateQuizRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(owner_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };

    match validate_required_text(&quiz.name, "Quiz name is required") {
        Ok(name) => quiz.name = name.to_string(),
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::QuizInvalid, msg)));
        }
    }

    if let Err(resp) = check_quiz_links(&storage, Some(quiz.subject_id), quiz.room_id).await {
        return Ok(resp);
    }

    match storage.create_quiz(owner_id, quiz).await {
        Ok(quiz) => {
            info!("Quiz {} created by {}", quiz.id, owner_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(quiz, "Quiz created successfully")))
        }
        Err(e) => Ok(storage_error_response("Create quiz", e)),
    }
}

/// 学科与聊天室必须存在
pub(super) async fn check_quiz_links(
    storage: &Arc<dyn Storage>,
    subject_id: Option<i64>,
    room_id: Option<i64>,
) -> Result<(), HttpResponse> {
    if let Some(subject_id) = subject_id {
        match storage.get_subject_by_id(subject_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::SubjectNotFound,
                    "Subject not found",
                )));
            }
            Err(e) => return Err(storage_error_response("Check subject", e)),
        }
    }

    if let Some(room_id) = room_id {
        match storage.get_room_by_id(room_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::RoomNotFound,
                    "Room not found",
                )));
            }
            Err(e) => return Err(storage_error_response("Check room", e)),
        }
    }

    Ok(())
}
