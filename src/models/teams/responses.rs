use serde::Serialize;
use ts_rs::TS;

use super::entities::{Team, TeamListItem};
use crate::models::rooms::{MessageItem, Room};
use crate::models::users::UserSummary;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/team.ts")]
pub struct TeamListResponse {
    pub items: Vec<TeamListItem>,
}

// 小组详情；测验关联了聊天室时附带该聊天室的消息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/team.ts")]
pub struct TeamDetailResponse {
    pub team: Team,
    pub quiz_name: String,
    pub members: Vec<UserSummary>,
    pub room: Option<Room>,
    pub messages: Vec<MessageItem>,
}
