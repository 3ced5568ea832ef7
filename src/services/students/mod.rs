pub mod available;
pub mod export;
pub mod interests;
pub mod progress;
pub mod submit;
pub mod take;
pub mod taken;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::subjects::requests::UpdateInterestsRequest;
use crate::models::taking::requests::SubmitAnswerRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn get_interests(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        interests::get_interests(self, request).await
    }

    pub async fn update_interests(
        &self,
        request: &HttpRequest,
        update: UpdateInterestsRequest,
    ) -> ActixResult<HttpResponse> {
        interests::update_interests(self, request, update).await
    }

    // 兴趣学科内可参加的测验
    pub async fn list_available_quizzes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        available::list_available_quizzes(self, request).await
    }

    pub async fn list_taken_quizzes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        taken::list_taken_quizzes(self, request).await
    }

    // 当前待答题目
    pub async fn get_take_state(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        take::get_take_state(self, request, quiz_id).await
    }

    pub async fn submit_answer(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        submit: SubmitAnswerRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_answer(self, request, quiz_id, submit).await
    }

    // 导出本人的测验结果
    pub async fn export_result(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        export::export_result(self, request, quiz_id).await
    }
}

fn quiz_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::QuizNotFound,
        "Quiz not found",
    ))
}

fn quiz_already_taken() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::QuizAlreadyTaken,
        "quiz already taken",
    ))
}
