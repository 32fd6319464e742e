use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A storage container for oil.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    pub id: i64,
    pub label: String,
    pub capacity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One entry in a container's append-only content ledger. The newest entry
/// is the container's current fill level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerContent {
    pub id: i64,
    pub container_id: i64,
    pub total_weight: i64,
    pub recorded_at: DateTime<Utc>,
    pub value: Option<i64>,
    pub currency: Option<String>,
}

/// The container view the frontend works with: identity plus the latest
/// ledger entry collapsed into a current weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerView {
    pub id: i64,
    pub label: String,
    pub capacity: i64,
    #[serde(rename = "currentWeight")]
    pub current_weight: i64,
    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,
}

/// Input for creating a container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContainerInput {
    pub label: String,
    pub capacity: i64,
}

/// A movement on a container: oil added from production or sold out of it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContainerTransactionType {
    Add,
    Sell,
}

/// Input for a container transaction. `price_per_kg` values the movement;
/// sells clamp the resulting weight at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerTransactionInput {
    #[serde(rename = "type")]
    pub transaction_type: ContainerTransactionType,
    pub weight: i64,
    #[serde(rename = "pricePerKg")]
    pub price_per_kg: Option<i64>,
}
