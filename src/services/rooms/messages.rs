use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::RoomService;
use crate::middlewares::RequireJWT;
use crate::models::rooms::Room;
use crate::models::rooms::requests::PostMessageRequest;
use crate::models::{ApiResponse, ErrorCode, PaginationQuery};
use crate::services::{storage_error_response, unauthorized};
use crate::storage::Storage;

const MESSAGE_MISSING: &str = "Message content is missing.";

async fn find_room(storage: &Arc<dyn Storage>, room_id: i64) -> Result<Room, HttpResponse> {
    match storage.get_room_by_id(room_id).await {
        Ok(Some(room)) => Ok(room),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RoomNotFound,
            "Room not found",
        ))),
        Err(e) => Err(storage_error_response("Get room", e)),
    }
}

/// 校验消息内容，返回去除首尾空白后的文本
pub fn validate_message(content: &str, max_len: usize) -> Result<&str, String> {
    let content = content.trim();
    if content.is_empty() {
        return Err(MESSAGE_MISSING.to_string());
    }
    if content.chars().count() > max_len {
        return Err(format!("Message may have at most {max_len} characters."));
    }
    Ok(content)
}

pub async fn list_messages(
    service: &RoomService,
    request: &HttpRequest,
    room_id: i64,
    query: PaginationQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let room = match find_room(&storage, room_id).await {
        Ok(room) => room,
        Err(resp) => return Ok(resp),
    };

    match storage.list_messages_page(room.id, query).await {
        Ok(page) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(page, "Messages retrieved successfully"))),
        Err(e) => Ok(storage_error_response("List messages", e)),
    }
}

pub async fn post_message(
    service: &RoomService,
    request: &HttpRequest,
    room_id: i64,
    message: PostMessageRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };

    let content =
        match validate_message(&message.content, service.get_config().quiz.max_message_length) {
            Ok(content) => content,
            Err(msg) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::MessageInvalid, msg)));
            }
        };

    let room = match find_room(&storage, room_id).await {
        Ok(room) => room,
        Err(resp) => return Ok(resp),
    };

    match storage.create_message(room.id, user_id, content).await {
        Ok(item) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(item, "Message posted")))
        }
        Err(e) => Ok(storage_error_response("Post message", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_message_rejected() {
        assert_eq!(validate_message("", 100).unwrap_err(), MESSAGE_MISSING);
        assert_eq!(validate_message(" \n\t ", 100).unwrap_err(), MESSAGE_MISSING);
    }

    #[test]
    fn test_message_trimmed_and_length_limited() {
        assert_eq!(validate_message("  hi all ", 100).unwrap(), "hi all");
        assert!(validate_message("abcdef", 5).is_err());
        assert!(validate_message("привет", 6).is_ok());
    }
}
