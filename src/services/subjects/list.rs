use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::ApiResponse;
use crate::models::subjects::responses::SubjectListResponse;
use crate::services::storage_error_response;

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_subjects().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubjectListResponse { items },
            "Subjects retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response("List subjects", e)),
    }
}
