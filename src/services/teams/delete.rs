use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TeamService, find_managed_team, team_not_found};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::services::{storage_error_response, unauthorized};

pub async fn delete_team(
    service: &TeamService,
    request: &HttpRequest,
    team_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(unauthorized());
    };

    let (team, _) = match find_managed_team(&storage, &user, team_id).await {
        Ok(found) => found,
        Err(resp) => return Ok(resp),
    };

    // 已完成记录上的小组引用会被置空
    match storage.delete_team(team.id).await {
        Ok(true) => {
            info!("Team {} deleted", team.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Team deleted successfully")))
        }
        Ok(false) => Ok(team_not_found()),
        Err(e) => Ok(storage_error_response("Delete team", e)),
    }
}
