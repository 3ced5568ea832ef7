use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeamService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::teams::responses::TeamListResponse;
use crate::models::users::UserRole;
use crate::services::{storage_error_response, unauthorized};

pub async fn list_teams(service: &TeamService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(unauthorized());
    };

    // 教师只看到自己测验下的小组
    let owner = (user.role != UserRole::Admin).then_some(user.id);

    match storage.list_teams(owner).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TeamListResponse { items },
            "Teams retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response("List teams", e)),
    }
}
