pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod members;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::middlewares::require_quiz_owner::can_manage_quiz;
use crate::models::teams::{Team, requests::CreateTeamRequest};
use crate::models::users::User;
use crate::models::quizzes::Quiz;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::storage::Storage;

pub struct TeamService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeamService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::resolve_storage(&self.storage, request)
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub async fn list_teams(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_teams(self, request).await
    }

    pub async fn create_team(
        &self,
        request: &HttpRequest,
        team: CreateTeamRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_team(self, request, team).await
    }

    // 小组详情：成员与测验聊天室的消息
    pub async fn get_team(&self, request: &HttpRequest, team_id: i64) -> ActixResult<HttpResponse> {
        get::get_team(self, request, team_id).await
    }

    pub async fn delete_team(
        &self,
        request: &HttpRequest,
        team_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_team(self, request, team_id).await
    }
}

fn team_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::TeamNotFound,
        "Team not found",
    ))
}

/// 查找调用者可以管理的小组及其测验；不可见的小组按不存在处理
pub(crate) async fn find_managed_team(
    storage: &Arc<dyn Storage>,
    user: &User,
    team_id: i64,
) -> Result<(Team, Quiz), HttpResponse> {
    let team = match storage.get_team_by_id(team_id).await {
        Ok(Some(team)) => team,
        Ok(None) => return Err(team_not_found()),
        Err(e) => return Err(storage_error_response("Get team", e)),
    };

    match storage.get_quiz_by_id(team.quiz_id).await {
        Ok(Some(quiz)) if can_manage_quiz(user, &quiz) => Ok((team, quiz)),
        Ok(_) => Err(team_not_found()),
        Err(e) => Err(storage_error_response("Get team", e)),
    }
}
