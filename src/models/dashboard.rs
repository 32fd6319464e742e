use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::batch::DecisionType;
use super::oil::OilGrade;

/// The headline numbers on the dashboard landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardOverview {
    pub total_clients: i64,
    /// Batches still `received` or `in_process`.
    pub active_batches: i64,
    /// Sum of oil batch weights, all time.
    pub total_oil_produced: i64,
    /// Invoices in `sent` or `overdue`.
    pub pending_invoices: i64,
    /// Quality tests recorded in the last 7 days.
    pub recent_quality_tests: i64,
    /// Sum of paid invoice amounts.
    pub total_revenue: i64,
    /// Tickets created since the start of today (UTC).
    pub today_tickets: i64,
    /// Rooms with an open pressing session.
    pub active_rooms: i64,
    /// Boxes across open sessions.
    pub current_boxes: i64,
}

/// One day's production line on the summary chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyProduction {
    pub date: String,
    pub batches_processed: i64,
    pub total_oil: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeCount {
    pub grade: OilGrade,
    pub count: i64,
}

/// Production over the last N days plus the grade distribution of tests in
/// the same window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionSummary {
    pub period_days: i64,
    pub production: Vec<DailyProduction>,
    pub quality_distribution: Vec<GradeCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionBreakdown {
    #[serde(rename = "type")]
    pub decision_type: DecisionType,
    pub count: i64,
    pub average_unit_price: Option<f64>,
}

/// Financial picture for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub month: u32,
    pub year: i32,
    /// Paid invoice amounts issued that month.
    pub monthly_revenue: i64,
    /// Open (`sent` or `overdue`) invoice amounts, all time.
    pub outstanding_amount: i64,
    pub processing_breakdown: Vec<DecisionBreakdown>,
}

/// One line in the recent-activity feed, merged from tickets, sessions and
/// client registrations. Descriptions are the Arabic strings the UI shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub id: String,
    pub kind: ActivityKind,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Ticket,
    Session,
    Client,
}
