use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use super::progress::grade_band;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::taking::responses::{TakenQuizItem, TakenQuizListResponse};
use crate::services::{storage_error_response, unauthorized};

pub async fn list_taken_quizzes(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };

    match storage.list_taken_quizzes(user_id).await {
        Ok(entries) => {
            let items = entries
                .into_iter()
                .map(|entry| TakenQuizItem {
                    grade: grade_band(entry.taken.score),
                    entry,
                })
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                TakenQuizListResponse { items },
                "Taken quizzes retrieved successfully",
            )))
        }
        Err(e) => Ok(storage_error_response("List taken quizzes", e)),
    }
}
