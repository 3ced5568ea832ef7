pub mod create;
pub mod delete;
pub mod formset;
pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::questions::{
    Question,
    requests::{CreateQuestionRequest, UpdateQuestionRequest},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::storage::Storage;

pub struct QuestionService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuestionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::resolve_storage(&self.storage, request)
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub async fn add_question(
        &self,
        request: &HttpRequest,
        question: CreateQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        create::add_question(self, request, question).await
    }

    // 题目及其选项
    pub async fn get_question(
        &self,
        request: &HttpRequest,
        question_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_question(self, request, question_id).await
    }

    // 保存题目文本与选项表单
    pub async fn update_question(
        &self,
        request: &HttpRequest,
        question_id: i64,
        update: UpdateQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_question(self, request, question_id, update).await
    }

    pub async fn delete_question(
        &self,
        request: &HttpRequest,
        question_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_question(self, request, question_id).await
    }
}

/// 查找属于测验的题目，不存在时返回 404
pub(crate) async fn find_question(
    storage: &Arc<dyn Storage>,
    quiz_id: i64,
    question_id: i64,
) -> Result<Question, HttpResponse> {
    match storage.get_question(quiz_id, question_id).await {
        Ok(Some(question)) => Ok(question),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "Question not found",
        ))),
        Err(e) => Err(storage_error_response("Get question", e)),
    }
}
