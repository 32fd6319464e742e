use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An olive grower who delivers to the mill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub phone: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for registering a new client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClientInput {
    pub firstname: String,
    pub lastname: String,
    pub phone: String,
    pub address: Option<String>,
}

/// Input for updating a client. All fields are optional for partial updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateClientInput {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// A page of clients with pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientPage {
    pub clients: Vec<Client>,
    pub pagination: Pagination,
}

/// Pagination metadata shared by the paged list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        let pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self { total, page, pages }
    }
}
