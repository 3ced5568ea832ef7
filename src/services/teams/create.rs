use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeamService;
use super::members::validate_team_members;
use crate::errors::ClassroomError;
use crate::middlewares::RequireJWT;
use crate::middlewares::require_quiz_owner::can_manage_quiz;
use crate::models::teams::requests::CreateTeamRequest;
use crate::models::users::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{storage_error_response, unauthorized};
use crate::utils::validate::validate_required_text;

pub async fn create_team(
    service: &TeamService,
    request: &HttpRequest,
    team: CreateTeamRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(unauthorized());
    };

    let name = match validate_required_text(&team.name, "Team name is required") {
        Ok(name) => name,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::TeamInvalid, msg)));
        }
    };

    if let Err(msg) =
        validate_team_members(&team.student_ids, service.get_config().quiz.max_team_size)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::TeamInvalid, msg)));
    }

    // 测验必须属于当前教师
    match storage.get_quiz_by_id(team.quiz_id).await {
        Ok(Some(quiz)) if can_manage_quiz(&user, &quiz) => {}
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::QuizNotFound,
                "Quiz not found",
            )));
        }
        Err(e) => return Ok(storage_error_response("Create team", e)),
    }

    // 每个 id 都必须是学生
    match storage.get_users_by_ids(&team.student_ids).await {
        Ok(users)
            if users.len() == team.student_ids.len()
                && users.iter().all(|u| u.role == UserRole::Student) => {}
        Ok(_) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::TeamInvalid,
                "Every team member must be an existing student.",
            )));
        }
        Err(e) => return Ok(storage_error_response("Create team", e)),
    }

    match storage
        .create_team(name, team.quiz_id, &team.student_ids)
        .await
    {
        Ok(created) => {
            info!(
                "Team {} created for quiz {} with {} students",
                created.id,
                created.quiz_id,
                team.student_ids.len()
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(created, "Team created successfully")))
        }
        Err(ClassroomError::Validation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::TeamInvalid, msg))),
        Err(e) => Ok(storage_error_response("Create team", e)),
    }
}
