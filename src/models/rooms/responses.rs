use serde::Serialize;
use ts_rs::TS;

use super::entities::Room;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct RoomListResponse {
    pub items: Vec<Room>,
}
