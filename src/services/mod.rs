pub mod auth;
pub mod questions;
pub mod quizzes;
pub mod reports;
pub mod rooms;
pub mod students;
pub mod subjects;
pub mod teams;

pub use auth::AuthService;
pub use questions::QuestionService;
pub use quizzes::QuizService;
pub use rooms::RoomService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use teams::TeamService;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;
use tracing::error;

use crate::errors::ClassroomError;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 服务持有的存储优先，否则从 app data 中取
pub(crate) fn resolve_storage(
    storage: &Option<Arc<dyn Storage>>,
    request: &HttpRequest,
) -> Arc<dyn Storage> {
    if let Some(storage) = storage {
        storage.clone()
    } else {
        request
            .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
            .expect("Storage not found in app data")
            .get_ref()
            .clone()
    }
}

/// 存储层错误转换为响应：客户端可修正的错误原样返回，其余记录日志后返回 500
pub(crate) fn storage_error_response(context: &str, err: ClassroomError) -> HttpResponse {
    match err {
        ClassroomError::Validation(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        }
        ClassroomError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg))
        }
        ClassroomError::Conflict(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::Conflict, msg))
        }
        other => {
            error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("{context} failed"),
            ))
        }
    }
}

/// 当前用户缺失时的 401 响应
pub(crate) fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Unauthorized: missing user",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_status_mapping() {
        let resp = storage_error_response("x", ClassroomError::validation("bad"));
        assert_eq!(resp.status(), 400);
        let resp = storage_error_response("x", ClassroomError::conflict("dup"));
        assert_eq!(resp.status(), 409);
        let resp = storage_error_response("x", ClassroomError::not_found("gone"));
        assert_eq!(resp.status(), 404);
        let resp = storage_error_response("x", ClassroomError::database_operation("boom"));
        assert_eq!(resp.status(), 500);
    }
}
