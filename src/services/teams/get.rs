use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TeamService, find_managed_team};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::teams::responses::TeamDetailResponse;
use crate::services::{storage_error_response, unauthorized};

pub async fn get_team(
    service: &TeamService,
    request: &HttpRequest,
    team_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(unauthorized());
    };

    let (team, quiz) = match find_managed_team(&storage, &user, team_id).await {
        Ok(found) => found,
        Err(resp) => return Ok(resp),
    };

    let members = match storage.list_team_members(team.id).await {
        Ok(members) => members,
        Err(e) => return Ok(storage_error_response("Get team", e)),
    };

    // 测验关联了聊天室时附带消息
    let room = match quiz.room_id {
        Some(room_id) => match storage.get_room_by_id(room_id).await {
            Ok(room) => room,
            Err(e) => return Ok(storage_error_response("Get team", e)),
        },
        None => None,
    };
    let messages = match &room {
        Some(room) => match storage.list_messages(room.id).await {
            Ok(messages) => messages,
            Err(e) => return Ok(storage_error_response("Get team", e)),
        },
        None => Vec::new(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TeamDetailResponse {
            team,
            quiz_name: quiz.name,
            members,
            room,
            messages,
        },
        "Team retrieved successfully",
    )))
}
