use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 聊天室
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct Message {
    pub id: i64,
    pub room_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 带作者用户名的消息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct MessageItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub message: Message,
    pub username: String,
}
