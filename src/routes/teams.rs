use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::teams::requests::CreateTeamRequest;
use crate::models::users::UserRole;
use crate::services::TeamService;
use crate::utils::SafeTeamIdI64;

static TEAM_SERVICE: Lazy<TeamService> = Lazy::new(TeamService::new_lazy);

pub async fn list_teams(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEAM_SERVICE.list_teams(&req).await
}

pub async fn create_team(
    req: HttpRequest,
    team: web::Json<CreateTeamRequest>,
) -> ActixResult<HttpResponse> {
    TEAM_SERVICE.create_team(&req, team.into_inner()).await
}

pub async fn get_team(req: HttpRequest, team_id: SafeTeamIdI64) -> ActixResult<HttpResponse> {
    TEAM_SERVICE.get_team(&req, team_id.0).await
}

pub async fn delete_team(req: HttpRequest, team_id: SafeTeamIdI64) -> ActixResult<HttpResponse> {
    TEAM_SERVICE.delete_team(&req, team_id.0).await
}

// 配置路由
pub fn configure_team_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teacher/teams")
            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_teams))
                    .route(web::post().to(create_team)),
            )
            .service(
                web::resource("/{team_id}")
                    .route(web::get().to(get_team))
                    .route(web::delete().to(delete_team)),
            ),
    );
}
