use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::batch::{Batch, ProcessingDecision};
use super::client::Client;
use super::pressing::{PressingRoom, PressingSession};

/// The oil output of a pressing session, traceable back to the delivery it
/// was pressed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OilBatch {
    pub id: i64,
    pub weight: i64,
    pub residue: Option<i64>,
    #[serde(rename = "batchId")]
    pub batch_id: Option<i64>,
    pub pressing_session_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Input for recording a new oil batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOilBatchInput {
    pub weight: i64,
    pub residue: Option<i64>,
    #[serde(rename = "batchId")]
    pub batch_id: Option<i64>,
    pub pressing_session_id: Option<i64>,
}

/// An oil batch with its quality tests, as returned by the list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OilBatchWithTests {
    #[serde(flatten)]
    pub oil_batch: OilBatch,
    pub quality_tests: Vec<QualityTest>,
}

/// Full provenance chain for an oil batch: who delivered the olives, what
/// was decided, where and when they were pressed, and how the oil graded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OilBatchTraceability {
    pub oil_batch: OilBatch,
    pub batch: Option<Batch>,
    pub client: Option<Client>,
    pub processing_decisions: Vec<ProcessingDecision>,
    pub pressing_session: Option<PressingSession>,
    pub pressing_room: Option<PressingRoom>,
    pub quality_tests: Vec<QualityTest>,
}

/// A lab test on an oil batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityTest {
    pub id: i64,
    pub oil_batch_id: i64,
    pub acidity_level: Option<f64>,
    pub grade: OilGrade,
    pub test_date: NaiveDate,
    pub tested_by_employee_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Commercial oil grade by acidity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OilGrade {
    ExtraVirgin,
    Virgin,
    Ordinary,
}

impl OilGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExtraVirgin => "extra_virgin",
            Self::Virgin => "virgin",
            Self::Ordinary => "ordinary",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "extra_virgin" => Some(Self::ExtraVirgin),
            "virgin" => Some(Self::Virgin),
            "ordinary" => Some(Self::Ordinary),
            _ => None,
        }
    }
}

/// Input for recording a quality test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQualityTestInput {
    pub oil_batch_id: i64,
    pub acidity_level: Option<f64>,
    pub grade: OilGrade,
    pub tested_by_employee_id: Option<i64>,
}
