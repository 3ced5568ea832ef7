use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::models::subjects::{entities::DEFAULT_SUBJECT_COLOR, requests::CreateSubjectRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::utils::validate::{validate_color, validate_required_text};

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let name = match validate_required_text(&subject.name, "Subject name is required") {
        Ok(name) => name,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::SubjectInvalid, msg)));
        }
    };

    let color = subject
        .color
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_SUBJECT_COLOR);
    if let Err(msg) = validate_color(color) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::SubjectInvalid, msg)));
    }

    // 名称唯一
    match storage.get_subject_by_name(name).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::SubjectAlreadyExists,
                "Subject already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(storage_error_response("Create subject", e)),
    }

    match storage.create_subject(name, color).await {
        Ok(subject) => {
            info!("Subject {} created", subject.name);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(subject, "Subject created successfully")))
        }
        Err(e) => Ok(storage_error_response("Create subject", e)),
    }
}
