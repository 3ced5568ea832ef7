use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct CreateRoomRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct PostMessageRequest {
    #[serde(default)]
    pub content: String,
}
