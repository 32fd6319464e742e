use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::batch::PaymentMethod;

/// Reference prices for a given day. One row per date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Price {
    pub id: i64,
    pub date: NaiveDate,
    pub milling_price_per_kg: i64,
    pub oil_client_selling_price_per_kg: i64,
    pub oil_export_selling_price_per_kg: i64,
    pub olive_buying_price_per_kg: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for posting the day's prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePriceInput {
    pub date: NaiveDate,
    pub milling_price_per_kg: i64,
    pub oil_client_selling_price_per_kg: i64,
    pub oil_export_selling_price_per_kg: i64,
    pub olive_buying_price_per_kg: i64,
}

/// An invoice issued to a client, optionally tied to the batch and the
/// processing decision it settles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    #[serde(rename = "clientId")]
    pub client_id: i64,
    #[serde(rename = "batchId")]
    pub batch_id: Option<i64>,
    pub processing_decision_id: Option<i64>,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "paid" => Some(Self::Paid),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }
}

/// Input for issuing an invoice. Issue date is set server-side; status
/// starts at `draft`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvoiceInput {
    #[serde(rename = "clientId")]
    pub client_id: i64,
    #[serde(rename = "batchId")]
    pub batch_id: Option<i64>,
    pub processing_decision_id: Option<i64>,
    pub amount: i64,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
}

/// A page of invoices with pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoicePage {
    pub invoices: Vec<Invoice>,
    pub pagination: super::Pagination,
}

/// Money received against an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    #[serde(rename = "invoiceId")]
    pub invoice_id: i64,
    pub amount: i64,
    pub payment_date: NaiveDate,
    pub payment_method: Option<PaymentMethod>,
    pub reference: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for recording a payment. Payment date is set server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentInput {
    #[serde(rename = "invoiceId")]
    pub invoice_id: i64,
    pub amount: i64,
    pub payment_method: Option<PaymentMethod>,
    pub reference: Option<String>,
}
