pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::subjects::requests::CreateSubjectRequest;
use crate::storage::Storage;

pub struct SubjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubjectService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::resolve_storage(&self.storage, request)
    }

    // 学科列表（按名称排序）
    pub async fn list_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_subjects(self, request).await
    }

    // 创建学科
    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        subject: CreateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_subject(self, request, subject).await
    }
}
