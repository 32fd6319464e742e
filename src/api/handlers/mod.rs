use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::api::middleware::{AuthConfig, Claims};
use crate::db::Database;
use crate::models::*;
use crate::shift::OperationalDay;

// ============================================================
// Error Handling
// ============================================================

/// Map a storage-layer error onto an HTTP response. Validation failures are
/// phrased for the client and keep their message; anything else surfaces as
/// a 500 with the raw message, matching what the frontend already handles.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    let msg = e.to_string();

    if msg.contains("not found") {
        tracing::warn!("Lookup failed: {}", msg);
        return (StatusCode::NOT_FOUND, msg);
    }
    if msg.contains("already") || msg.contains("Invalid") || msg.contains("required") {
        tracing::warn!("Validation error: {}", msg);
        return (StatusCode::BAD_REQUEST, msg);
    }

    tracing::error!("Internal error: {}", msg);
    (StatusCode::INTERNAL_SERVER_ERROR, msg)
}

fn not_found(what: &str) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("{what} not found"))
}

fn bad_request(msg: &str) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, msg.to_string())
}

const DEFAULT_PAGE_SIZE: i64 = 20;

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Auth
// ============================================================

pub async fn register(
    State(db): State<Database>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<UserView>), (StatusCode, String)> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(bad_request("Email and password are required"));
    }

    let role = match &input.role {
        Some(raw) => UserRole::normalize(raw).ok_or_else(|| bad_request("Invalid role"))?,
        None => UserRole::Employee,
    };

    if db
        .find_user_by_email(&input.email)
        .map_err(internal_error)?
        .is_some()
    {
        return Err(bad_request("Email already registered"));
    }

    let password_hash =
        bcrypt::hash(&input.password, bcrypt::DEFAULT_COST).map_err(internal_error)?;
    let user = db
        .create_user(
            &input.email,
            &password_hash,
            role,
            input.firstname,
            input.lastname,
        )
        .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(user.view())))
}

pub async fn login(
    State(db): State<Database>,
    State(auth): State<AuthConfig>,
    Json(input): Json<LoginInput>,
) -> Result<Json<LoginResponse>, (StatusCode, String)> {
    let invalid = || (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string());

    let user = db
        .find_user_by_email(&input.email)
        .map_err(internal_error)?
        .ok_or_else(invalid)?;

    let verified = bcrypt::verify(&input.password, &user.password_hash).unwrap_or(false);
    if !verified {
        return Err(invalid());
    }

    let token = auth.issue_token(&user).map_err(internal_error)?;
    Ok(Json(LoginResponse {
        token,
        user: user.view(),
    }))
}

pub async fn profile(
    State(db): State<Database>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserView>, (StatusCode, String)> {
    db.get_user(claims.sub)
        .map_err(internal_error)?
        .map(|user| Json(user.view()))
        .ok_or_else(|| not_found("User"))
}

// ============================================================
// Clients
// ============================================================

#[derive(Deserialize)]
pub struct ListClientsQuery {
    page: Option<i64>,
    limit: Option<i64>,
    search: Option<String>,
}

pub async fn list_clients(
    State(db): State<Database>,
    Query(query): Query<ListClientsQuery>,
) -> Result<Json<ClientPage>, (StatusCode, String)> {
    db.list_clients(
        query.search.as_deref(),
        query.page.unwrap_or(1),
        query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    )
    .map(Json)
    .map_err(internal_error)
}

pub async fn get_client(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<Client>, (StatusCode, String)> {
    db.get_client(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Client"))
}

pub async fn create_client(
    State(db): State<Database>,
    Json(input): Json<CreateClientInput>,
) -> Result<(StatusCode, Json<Client>), (StatusCode, String)> {
    if input.firstname.trim().is_empty() || input.lastname.trim().is_empty() {
        return Err(bad_request("First and last name are required"));
    }
    db.create_client(input)
        .map(|c| (StatusCode::CREATED, Json(c)))
        .map_err(internal_error)
}

pub async fn update_client(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateClientInput>,
) -> Result<Json<Client>, (StatusCode, String)> {
    db.update_client(id, input)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Client"))
}

pub async fn delete_client(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    if db.delete_client(id).map_err(internal_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Client"))
    }
}

// ============================================================
// Batches (weigh tickets)
// ============================================================

#[derive(Deserialize)]
pub struct ListBatchesQuery {
    page: Option<i64>,
    limit: Option<i64>,
    status: Option<String>,
    #[serde(alias = "clientId")]
    client_id: Option<i64>,
}

pub async fn list_batches(
    State(db): State<Database>,
    Query(query): Query<ListBatchesQuery>,
) -> Result<Json<BatchPage>, (StatusCode, String)> {
    let status = match &query.status {
        Some(raw) => {
            Some(BatchStatus::from_str(raw).ok_or_else(|| bad_request("Invalid status"))?)
        }
        None => None,
    };
    db.list_batches(
        status,
        query.client_id,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    )
    .map(Json)
    .map_err(internal_error)
}

pub async fn get_batch(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<BatchWithClient>, (StatusCode, String)> {
    db.get_batch(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Batch"))
}

pub async fn create_batch(
    State(db): State<Database>,
    Json(input): Json<CreateBatchInput>,
) -> Result<(StatusCode, Json<BatchWithClient>), (StatusCode, String)> {
    db.create_batch(input)
        .map(|b| (StatusCode::CREATED, Json(b)))
        .map_err(internal_error)
}

pub async fn update_batch(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateBatchInput>,
) -> Result<Json<BatchWithClient>, (StatusCode, String)> {
    db.update_batch(id, input)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Batch"))
}

#[derive(Deserialize)]
pub struct UpdateBatchStatusInput {
    status: BatchStatus,
}

pub async fn update_batch_status(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateBatchStatusInput>,
) -> Result<Json<Batch>, (StatusCode, String)> {
    db.update_batch_status(id, input.status)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Batch"))
}

pub async fn delete_batch(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    if db.delete_batch(id).map_err(internal_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Batch"))
    }
}

// ============================================================
// Processing decisions
// ============================================================

#[derive(Deserialize)]
pub struct ListDecisionsQuery {
    #[serde(alias = "batchId")]
    batch_id: Option<i64>,
    #[serde(rename = "type")]
    decision_type: Option<String>,
}

pub async fn list_decisions(
    State(db): State<Database>,
    Query(query): Query<ListDecisionsQuery>,
) -> Result<Json<Vec<ProcessingDecision>>, (StatusCode, String)> {
    let decision_type = match &query.decision_type {
        Some(raw) => {
            Some(DecisionType::from_str(raw).ok_or_else(|| bad_request("Invalid decision type"))?)
        }
        None => None,
    };
    db.list_decisions(query.batch_id, decision_type)
        .map(Json)
        .map_err(internal_error)
}

pub async fn create_decision(
    State(db): State<Database>,
    Json(input): Json<CreateDecisionInput>,
) -> Result<(StatusCode, Json<ProcessingDecision>), (StatusCode, String)> {
    db.create_decision(input)
        .map(|d| (StatusCode::CREATED, Json(d)))
        .map_err(internal_error)
}

pub async fn get_decision(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<ProcessingDecision>, (StatusCode, String)> {
    db.get_decision(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Processing decision"))
}

// ============================================================
// Pressing rooms
// ============================================================

pub async fn list_rooms(
    State(db): State<Database>,
) -> Result<Json<Vec<RoomWithStatus>>, (StatusCode, String)> {
    db.list_rooms().map(Json).map_err(internal_error)
}

pub async fn get_room(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<RoomWithStatus>, (StatusCode, String)> {
    db.get_room(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Pressing room"))
}

pub async fn create_room(
    State(db): State<Database>,
    Json(input): Json<CreateRoomInput>,
) -> Result<(StatusCode, Json<PressingRoom>), (StatusCode, String)> {
    if input.name.trim().is_empty() {
        return Err(bad_request("Room name is required"));
    }
    db.create_room(input)
        .map(|r| (StatusCode::CREATED, Json(r)))
        .map_err(internal_error)
}

pub async fn update_room(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateRoomInput>,
) -> Result<Json<PressingRoom>, (StatusCode, String)> {
    db.update_room(id, input)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Pressing room"))
}

// ============================================================
// Pressing sessions
// ============================================================

#[derive(Deserialize)]
pub struct ListSessionsQuery {
    active: Option<bool>,
    #[serde(alias = "roomId")]
    pressing_room_id: Option<i64>,
}

pub async fn list_sessions(
    State(db): State<Database>,
    Query(query): Query<ListSessionsQuery>,
) -> Result<Json<Vec<SessionWithRoom>>, (StatusCode, String)> {
    db.list_sessions(query.active.unwrap_or(false), query.pressing_room_id)
        .map(Json)
        .map_err(internal_error)
}

pub async fn start_session(
    State(db): State<Database>,
    Json(input): Json<StartSessionInput>,
) -> Result<(StatusCode, Json<SessionWithRoom>), (StatusCode, String)> {
    db.start_session(input)
        .map(|s| (StatusCode::CREATED, Json(s)))
        .map_err(internal_error)
}

pub async fn finish_session(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<PressingSession>, (StatusCode, String)> {
    db.finish_session(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Session"))
}

pub async fn get_session(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<SessionWithRoom>, (StatusCode, String)> {
    db.get_session(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Session"))
}

// ============================================================
// Oil batches
// ============================================================

#[derive(Deserialize)]
pub struct ListOilBatchesQuery {
    #[serde(alias = "batchId")]
    batch_id: Option<i64>,
    #[serde(alias = "sessionId")]
    session_id: Option<i64>,
    tested: Option<bool>,
}

pub async fn list_oil_batches(
    State(db): State<Database>,
    Query(query): Query<ListOilBatchesQuery>,
) -> Result<Json<Vec<OilBatchWithTests>>, (StatusCode, String)> {
    db.list_oil_batches(query.batch_id, query.session_id, query.tested)
        .map(Json)
        .map_err(internal_error)
}

pub async fn create_oil_batch(
    State(db): State<Database>,
    Json(input): Json<CreateOilBatchInput>,
) -> Result<(StatusCode, Json<OilBatch>), (StatusCode, String)> {
    if input.weight <= 0 {
        return Err(bad_request("Invalid weight"));
    }
    db.create_oil_batch(input)
        .map(|b| (StatusCode::CREATED, Json(b)))
        .map_err(internal_error)
}

pub async fn get_oil_batch(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<OilBatchWithTests>, (StatusCode, String)> {
    db.get_oil_batch(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Oil batch"))
}

pub async fn get_oil_batch_traceability(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<OilBatchTraceability>, (StatusCode, String)> {
    db.get_oil_batch_traceability(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Oil batch"))
}

// ============================================================
// Quality tests
// ============================================================

#[derive(Deserialize)]
pub struct ListQualityTestsQuery {
    #[serde(alias = "oilBatchId")]
    oil_batch_id: Option<i64>,
    grade: Option<String>,
    #[serde(alias = "employeeId")]
    employee_id: Option<i64>,
}

pub async fn list_quality_tests(
    State(db): State<Database>,
    Query(query): Query<ListQualityTestsQuery>,
) -> Result<Json<Vec<QualityTest>>, (StatusCode, String)> {
    let grade = match &query.grade {
        Some(raw) => Some(OilGrade::from_str(raw).ok_or_else(|| bad_request("Invalid grade"))?),
        None => None,
    };
    db.list_quality_tests(query.oil_batch_id, grade, query.employee_id)
        .map(Json)
        .map_err(internal_error)
}

pub async fn create_quality_test(
    State(db): State<Database>,
    Json(input): Json<CreateQualityTestInput>,
) -> Result<(StatusCode, Json<QualityTest>), (StatusCode, String)> {
    db.create_quality_test(input)
        .map(|t| (StatusCode::CREATED, Json(t)))
        .map_err(internal_error)
}

pub async fn get_quality_test(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<QualityTest>, (StatusCode, String)> {
    db.get_quality_test(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Quality test"))
}

// ============================================================
// Containers
// ============================================================

pub async fn list_containers(
    State(db): State<Database>,
) -> Result<Json<Vec<ContainerView>>, (StatusCode, String)> {
    db.list_containers().map(Json).map_err(internal_error)
}

pub async fn create_container(
    State(db): State<Database>,
    Json(input): Json<CreateContainerInput>,
) -> Result<(StatusCode, Json<ContainerView>), (StatusCode, String)> {
    if input.label.trim().is_empty() {
        return Err(bad_request("Label is required"));
    }
    db.create_container(input)
        .map(|c| (StatusCode::CREATED, Json(c)))
        .map_err(internal_error)
}

pub async fn list_container_contents(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<ContainerContent>>, (StatusCode, String)> {
    db.list_container_contents(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Container"))
}

pub async fn container_transaction(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(input): Json<ContainerTransactionInput>,
) -> Result<Json<ContainerView>, (StatusCode, String)> {
    if input.weight <= 0 {
        return Err(bad_request("Invalid weight"));
    }
    db.container_transaction(id, input)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Container"))
}

// ============================================================
// Prices
// ============================================================

#[derive(Deserialize)]
pub struct ListPricesQuery {
    latest: Option<bool>,
}

pub async fn list_prices(
    State(db): State<Database>,
    Query(query): Query<ListPricesQuery>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    if query.latest.unwrap_or(false) {
        let price = db
            .latest_price()
            .map_err(internal_error)?
            .ok_or_else(|| not_found("Price"))?;
        return Ok(Json(serde_json::json!(price)));
    }
    let prices = db.list_prices().map_err(internal_error)?;
    Ok(Json(serde_json::json!(prices)))
}

pub async fn create_price(
    State(db): State<Database>,
    Json(input): Json<CreatePriceInput>,
) -> Result<(StatusCode, Json<Price>), (StatusCode, String)> {
    db.create_price(input)
        .map(|p| (StatusCode::CREATED, Json(p)))
        .map_err(internal_error)
}

pub async fn get_price_by_date(
    State(db): State<Database>,
    Path(date): Path<chrono::NaiveDate>,
) -> Result<Json<Price>, (StatusCode, String)> {
    db.get_price_by_date(date)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Price"))
}

// ============================================================
// Invoices
// ============================================================

#[derive(Deserialize)]
pub struct ListInvoicesQuery {
    page: Option<i64>,
    limit: Option<i64>,
    status: Option<String>,
    #[serde(alias = "clientId")]
    client_id: Option<i64>,
}

pub async fn list_invoices(
    State(db): State<Database>,
    Query(query): Query<ListInvoicesQuery>,
) -> Result<Json<InvoicePage>, (StatusCode, String)> {
    let status = match &query.status {
        Some(raw) => {
            Some(InvoiceStatus::from_str(raw).ok_or_else(|| bad_request("Invalid status"))?)
        }
        None => None,
    };
    db.list_invoices(
        status,
        query.client_id,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    )
    .map(Json)
    .map_err(internal_error)
}

pub async fn create_invoice(
    State(db): State<Database>,
    Json(input): Json<CreateInvoiceInput>,
) -> Result<(StatusCode, Json<Invoice>), (StatusCode, String)> {
    if input.amount <= 0 {
        return Err(bad_request("Invalid amount"));
    }
    db.create_invoice(input)
        .map(|i| (StatusCode::CREATED, Json(i)))
        .map_err(internal_error)
}

pub async fn get_invoice(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<Invoice>, (StatusCode, String)> {
    db.get_invoice(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Invoice"))
}

#[derive(Deserialize)]
pub struct UpdateInvoiceStatusInput {
    status: InvoiceStatus,
}

pub async fn update_invoice_status(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateInvoiceStatusInput>,
) -> Result<Json<Invoice>, (StatusCode, String)> {
    db.update_invoice_status(id, input.status)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Invoice"))
}

// ============================================================
// Payments
// ============================================================

#[derive(Deserialize)]
pub struct ListPaymentsQuery {
    #[serde(alias = "invoiceId")]
    invoice_id: Option<i64>,
}

pub async fn list_payments(
    State(db): State<Database>,
    Query(query): Query<ListPaymentsQuery>,
) -> Result<Json<Vec<Payment>>, (StatusCode, String)> {
    db.list_payments(query.invoice_id)
        .map(Json)
        .map_err(internal_error)
}

pub async fn record_payment(
    State(db): State<Database>,
    Json(input): Json<CreatePaymentInput>,
) -> Result<(StatusCode, Json<Payment>), (StatusCode, String)> {
    if input.amount <= 0 {
        return Err(bad_request("Invalid amount"));
    }
    db.record_payment(input)
        .map_err(internal_error)?
        .map(|p| (StatusCode::CREATED, Json(p)))
        .ok_or_else(|| not_found("Invoice"))
}

// ============================================================
// Employees
// ============================================================

#[derive(Deserialize)]
pub struct ListEmployeesQuery {
    role: Option<String>,
    active: Option<bool>,
}

pub async fn list_employees(
    State(db): State<Database>,
    Query(query): Query<ListEmployeesQuery>,
) -> Result<Json<Vec<Employee>>, (StatusCode, String)> {
    let role = match &query.role {
        Some(raw) => {
            Some(EmployeeRole::from_str(raw).ok_or_else(|| bad_request("Invalid role"))?)
        }
        None => None,
    };
    db.list_employees(role, query.active)
        .map(Json)
        .map_err(internal_error)
}

pub async fn create_employee(
    State(db): State<Database>,
    Json(input): Json<CreateEmployeeInput>,
) -> Result<(StatusCode, Json<Employee>), (StatusCode, String)> {
    if input.firstname.trim().is_empty() || input.lastname.trim().is_empty() {
        return Err(bad_request("First and last name are required"));
    }
    db.create_employee(input)
        .map(|e| (StatusCode::CREATED, Json(e)))
        .map_err(internal_error)
}

pub async fn update_employee(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateEmployeeInput>,
) -> Result<Json<Employee>, (StatusCode, String)> {
    db.update_employee(id, input)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Employee"))
}

pub async fn get_employee(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, (StatusCode, String)> {
    db.get_employee(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Employee"))
}

// ============================================================
// Dashboard
// ============================================================

pub async fn dashboard_overview(
    State(db): State<Database>,
) -> Result<Json<DashboardOverview>, (StatusCode, String)> {
    db.dashboard_overview().map(Json).map_err(internal_error)
}

#[derive(Deserialize)]
pub struct ProductionQuery {
    /// Window length in days.
    period: Option<i64>,
}

pub async fn production_summary(
    State(db): State<Database>,
    Query(query): Query<ProductionQuery>,
) -> Result<Json<ProductionSummary>, (StatusCode, String)> {
    db.production_summary(query.period.unwrap_or(30))
        .map(Json)
        .map_err(internal_error)
}

#[derive(Deserialize)]
pub struct FinancialQuery {
    month: Option<u32>,
    year: Option<i32>,
}

pub async fn financial_summary(
    State(db): State<Database>,
    Query(query): Query<FinancialQuery>,
) -> Result<Json<FinancialSummary>, (StatusCode, String)> {
    let now = Utc::now();
    let month = query.month.unwrap_or_else(|| now.month());
    let year = query.year.unwrap_or_else(|| now.year());
    if !(1..=12).contains(&month) {
        return Err(bad_request("Invalid month"));
    }
    db.financial_summary(month, year)
        .map(Json)
        .map_err(internal_error)
}

#[derive(Deserialize)]
pub struct ActivityQuery {
    limit: Option<usize>,
}

pub async fn recent_activity(
    State(db): State<Database>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<ActivityEvent>>, (StatusCode, String)> {
    db.recent_activity(query.limit.unwrap_or(20))
        .map(Json)
        .map_err(internal_error)
}

/// Where the current instant falls in the 06:00-to-06:00 operational day,
/// plus the Arabic shift label the dashboard header shows.
pub async fn shift_status() -> impl IntoResponse {
    let day = OperationalDay::current();
    let label = day.shift_label_ar();
    Json(serde_json::json!({
        "day": day,
        "shift_label": label,
    }))
}
