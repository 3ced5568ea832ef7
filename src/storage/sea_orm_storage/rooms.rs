//! 聊天室与消息存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::messages::{
    ActiveModel as MessageActiveModel, Column as MessageColumn, Entity as Messages,
    Model as MessageModel,
};
use crate::entity::rooms::{ActiveModel, Column, Entity as Rooms};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{ClassroomError, Result};
use crate::models::{
    PaginatedResponse, PaginationInfo, PaginationQuery,
    rooms::{MessageItem, Room},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn list_rooms_impl(&self) -> Result<Vec<Room>> {
        let rooms = Rooms::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询聊天室列表失败: {e}")))?;

        Ok(rooms.into_iter().map(|m| m.into_room()).collect())
    }

    pub async fn get_room_by_id_impl(&self, room_id: i64) -> Result<Option<Room>> {
        let result = Rooms::find_by_id(room_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询聊天室失败: {e}")))?;

        Ok(result.map(|m| m.into_room()))
    }

    pub async fn get_room_by_name_impl(&self, name: &str) -> Result<Option<Room>> {
        let result = Rooms::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询聊天室失败: {e}")))?;

        Ok(result.map(|m| m.into_room()))
    }

    pub async fn create_room_impl(&self, name: &str) -> Result<Room> {
        let model = ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("创建聊天室失败: {e}")))?;

        Ok(result.into_room())
    }

    /// 分页列出消息，按创建时间升序
    pub async fn list_messages_page_impl(
        &self,
        room_id: i64,
        query: PaginationQuery,
    ) -> Result<PaginatedResponse<MessageItem>> {
        let (page, size) = query.normalized();

        let paginator = Messages::find()
            .filter(MessageColumn::RoomId.eq(room_id))
            .order_by_asc(MessageColumn::CreatedAt)
            .order_by_asc(MessageColumn::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询消息总数失败: {e}")))?;

        let messages = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询消息列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: self.attach_usernames(messages).await?,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 聊天室全部消息，按创建时间升序
    pub async fn list_messages_impl(&self, room_id: i64) -> Result<Vec<MessageItem>> {
        let messages = Messages::find()
            .filter(MessageColumn::RoomId.eq(room_id))
            .order_by_asc(MessageColumn::CreatedAt)
            .order_by_asc(MessageColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询消息列表失败: {e}")))?;

        self.attach_usernames(messages).await
    }

    pub async fn create_message_impl(
        &self,
        room_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<MessageItem> {
        let model = MessageActiveModel {
            room_id: Set(room_id),
            user_id: Set(user_id),
            content: Set(content.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("发送消息失败: {e}")))?;

        let mut items = self.attach_usernames(vec![result]).await?;
        items
            .pop()
            .ok_or_else(|| ClassroomError::database_operation("发送消息失败: 消息作者不存在"))
    }

    async fn attach_usernames(&self, messages: Vec<MessageModel>) -> Result<Vec<MessageItem>> {
        if messages.is_empty() {
            return Ok(Vec::new());
        }

        let usernames: HashMap<i64, String> = Users::find()
            .filter(UserColumn::Id.is_in(messages.iter().map(|m| m.user_id)))
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询消息作者失败: {e}")))?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        Ok(messages
            .into_iter()
            .map(|m| MessageItem {
                username: usernames.get(&m.user_id).cloned().unwrap_or_default(),
                message: m.into_message(),
            })
            .collect())
    }
}
