use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pressing room. Rooms have no stored status; a room is "active" while it
/// has a session with no finish time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PressingRoom {
    pub id: i64,
    pub name: String,
    pub capacity: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A room together with its derived occupancy status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomWithStatus {
    #[serde(flatten)]
    pub room: PressingRoom,
    pub status: RoomStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Active,
    Inactive,
}

/// Input for creating or renaming a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomInput {
    pub name: String,
    pub capacity: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoomInput {
    pub name: Option<String>,
    pub capacity: Option<i64>,
}

/// A time-bounded occupation of a pressing room. At most one open session
/// (finish = NULL) per room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PressingSession {
    pub id: i64,
    pub pressing_room_id: Option<i64>,
    pub start: DateTime<Utc>,
    pub finish: Option<DateTime<Utc>>,
    pub number_of_boxes: i64,
    pub created_at: DateTime<Utc>,
}

/// Input for starting a session in a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartSessionInput {
    pub pressing_room_id: i64,
    pub number_of_boxes: i64,
}

/// A session with its room, as returned by the session endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionWithRoom {
    #[serde(flatten)]
    pub session: PressingSession,
    pub pressing_room: Option<PressingRoom>,
}
