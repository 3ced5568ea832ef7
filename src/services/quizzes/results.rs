use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{QuizService, owned_quiz};
use crate::models::ApiResponse;
use crate::models::quizzes::responses::QuizResultsResponse;
use crate::services::storage_error_response;
use crate::services::students::progress::mean_score;

pub async fn quiz_results(
    service: &QuizService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let quiz = match owned_quiz(request) {
        Ok(quiz) => quiz,
        Err(resp) => return Ok(resp),
    };

    let taken_quizzes = match storage.list_quiz_results(quiz.id).await {
        Ok(records) => records,
        Err(e) => return Ok(storage_error_response("Quiz results", e)),
    };

    let scores: Vec<f64> = taken_quizzes.iter().map(|r| r.taken.score).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        QuizResultsResponse {
            total_taken_quizzes: taken_quizzes.len() as i64,
            average_score: mean_score(&scores),
            quiz,
            taken_quizzes,
        },
        "Quiz results retrieved successfully",
    )))
}
