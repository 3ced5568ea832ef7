use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::RoomService;
use crate::models::rooms::requests::CreateRoomRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::utils::validate::validate_required_text;

pub async fn create_room(
    service: &RoomService,
    request: &HttpRequest,
    room: CreateRoomRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let name = match validate_required_text(&room.name, "Room name is required") {
        Ok(name) => name,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::RoomInvalid, msg)));
        }
    };

    match storage.get_room_by_name(name).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::RoomAlreadyExists,
                format!("Room '{name}' already exists"),
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(storage_error_response("Create room", e)),
    }

    match storage.create_room(name).await {
        Ok(created) => {
            info!("Room {} created: {}", created.id, created.name);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(created, "Room created successfully")))
        }
        Err(e) => Ok(storage_error_response("Create room", e)),
    }
}
