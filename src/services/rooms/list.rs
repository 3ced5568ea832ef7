use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RoomService;
use crate::models::ApiResponse;
use crate::models::rooms::responses::RoomListResponse;
use crate::services::storage_error_response;

pub async fn list_rooms(service: &RoomService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_rooms().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RoomListResponse { items },
            "Rooms retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response("List rooms", e)),
    }
}
