use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::client::Client;

/// A weigh ticket for one olive delivery.
///
/// The ticket is created at the weighbridge (weight in, box count), updated
/// when the truck leaves (weight out), and carries the payment fields the
/// QR scanner edits in the field. Net weight is what the mill settles on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub id: i64,
    #[serde(rename = "clientId")]
    pub client_id: i64,
    pub date_received: DateTime<Utc>,
    pub weight_in: Option<i64>,
    pub weight_out: Option<i64>,
    pub net_weight: i64,
    pub number_of_boxes: i64,
    pub status: BatchStatus,
    pub unit_price: Option<i64>,
    pub total_amount: Option<i64>,
    pub is_paid: bool,
    pub payment_method: Option<PaymentMethod>,
    pub payment_reference: Option<String>,
    pub date_paid: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle of a delivery: received at the gate, being pressed, done.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Received,
    InProcess,
    Completed,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::InProcess => "in_process",
            Self::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "received" => Some(Self::Received),
            "in_process" => Some(Self::InProcess),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// How a settlement was paid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Check,
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Check => "check",
            Self::BankTransfer => "bank_transfer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(Self::Cash),
            "check" => Some(Self::Check),
            "bank_transfer" => Some(Self::BankTransfer),
            _ => None,
        }
    }
}

/// Input for creating a new batch at the weighbridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBatchInput {
    #[serde(rename = "clientId")]
    pub client_id: i64,
    pub weight_in: Option<i64>,
    pub weight_out: Option<i64>,
    pub net_weight: i64,
    pub number_of_boxes: i64,
}

/// Generic ticket update. Accepts both the snake_case names the API uses and
/// the camelCase names the scanner frontend historically sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBatchInput {
    #[serde(alias = "weightIn")]
    pub weight_in: Option<i64>,
    #[serde(alias = "weightOut")]
    pub weight_out: Option<i64>,
    #[serde(alias = "netWeight")]
    pub net_weight: Option<i64>,
    #[serde(alias = "numberOfBoxes")]
    pub number_of_boxes: Option<i64>,
    #[serde(alias = "unitPrice")]
    pub unit_price: Option<i64>,
    #[serde(alias = "totalAmount")]
    pub total_amount: Option<i64>,
    pub status: Option<BatchStatus>,
    #[serde(alias = "isPaid")]
    pub is_paid: Option<bool>,
    #[serde(alias = "paymentMethod")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(alias = "paymentReference")]
    pub payment_reference: Option<String>,
    #[serde(alias = "datePaid")]
    pub date_paid: Option<NaiveDate>,
}

/// A batch together with its client, as returned by the ticket endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchWithClient {
    #[serde(flatten)]
    pub batch: Batch,
    pub client: Option<Client>,
}

/// A page of batches with pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPage {
    pub batches: Vec<BatchWithClient>,
    pub pagination: super::Pagination,
}

/// Record of what happens to a batch's olives: milled for the client or
/// bought by the mill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingDecision {
    pub id: i64,
    #[serde(rename = "batchId")]
    pub batch_id: i64,
    #[serde(rename = "type")]
    pub decision_type: DecisionType,
    pub date: DateTime<Utc>,
    pub unit_price: Option<i64>,
    #[serde(rename = "priceId")]
    pub price_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DecisionType {
    Milling,
    Selling,
}

impl DecisionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Milling => "milling",
            Self::Selling => "selling",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "milling" => Some(Self::Milling),
            "selling" => Some(Self::Selling),
            _ => None,
        }
    }
}

/// Input for recording a processing decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDecisionInput {
    #[serde(rename = "batchId")]
    pub batch_id: i64,
    #[serde(rename = "type")]
    pub decision_type: DecisionType,
    pub unit_price: Option<i64>,
    #[serde(rename = "priceId")]
    pub price_id: Option<i64>,
}
