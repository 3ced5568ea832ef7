pub mod create;
pub mod list;
pub mod messages;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::PaginationQuery;
use crate::models::rooms::requests::{CreateRoomRequest, PostMessageRequest};
use crate::storage::Storage;

pub struct RoomService {
    storage: Option<Arc<dyn Storage>>,
}

impl RoomService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::resolve_storage(&self.storage, request)
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub async fn list_rooms(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_rooms(self, request).await
    }

    pub async fn create_room(
        &self,
        request: &HttpRequest,
        room: CreateRoomRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_room(self, request, room).await
    }

    // 分页列出聊天室消息（时间升序）
    pub async fn list_messages(
        &self,
        request: &HttpRequest,
        room_id: i64,
        query: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        messages::list_messages(self, request, room_id, query).await
    }

    pub async fn post_message(
        &self,
        request: &HttpRequest,
        room_id: i64,
        message: PostMessageRequest,
    ) -> ActixResult<HttpResponse> {
        messages::post_message(self, request, room_id, message).await
    }
}
