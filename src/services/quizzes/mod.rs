pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod results;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireQuizOwner;
use crate::models::quizzes::{
    Quiz,
    requests::{CreateQuizRequest, ExportFormat, UpdateQuizRequest},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct QuizService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuizService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::resolve_storage(&self.storage, request)
    }

    // 当前教师的测验列表（管理员为全部测验）
    pub async fn list_quizzes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_quizzes(self, request).await
    }

    pub async fn create_quiz(
        &self,
        request: &HttpRequest,
        quiz: CreateQuizRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_quiz(self, request, quiz).await
    }

    // 测验详情及题目摘要
    pub async fn get_quiz(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_quiz(self, request).await
    }

    pub async fn update_quiz(
        &self,
        request: &HttpRequest,
        update: UpdateQuizRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_quiz(self, request, update).await
    }

    pub async fn delete_quiz(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_quiz(self, request).await
    }

    // 完成记录与平均分
    pub async fn quiz_results(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        results::quiz_results(self, request).await
    }

    // 导出测验结果报表
    pub async fn export_results(
        &self,
        request: &HttpRequest,
        format: ExportFormat,
    ) -> ActixResult<HttpResponse> {
        let quiz = match owned_quiz(request) {
            Ok(quiz) => quiz,
            Err(resp) => return Ok(resp),
        };
        let storage = self.get_storage(request);
        crate::services::reports::quiz_results::export_quiz_results(&storage, &quiz, format).await
    }
}

/// RequireQuizOwner 校验通过的测验
pub(crate) fn owned_quiz(request: &HttpRequest) -> Result<Quiz, HttpResponse> {
    RequireQuizOwner::extract_quiz(request).ok_or_else(|| {
        HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuizNotFound,
            "Quiz not found",
        ))
    })
}
