mod handlers;
pub mod middleware;

use axum::{
    extract::FromRef,
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Database;
pub use middleware::{AuthConfig, Claims};

/// Shared application state: the database handle plus the JWT config.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub auth: AuthConfig,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for AuthConfig {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

pub fn create_router(db: Database, auth: AuthConfig) -> Router {
    let state = AppState { db, auth };

    // Health and auth entry points stay reachable without a token.
    let public = Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login));

    let protected = Router::new()
        .route("/auth/profile", get(handlers::profile))
        // Clients
        .route("/clients", get(handlers::list_clients))
        .route("/clients", post(handlers::create_client))
        .route("/clients/{id}", get(handlers::get_client))
        .route("/clients/{id}", put(handlers::update_client))
        .route("/clients/{id}", delete(handlers::delete_client))
        // Batches (weigh tickets)
        .route("/batches", get(handlers::list_batches))
        .route("/batches", post(handlers::create_batch))
        .route("/batches/{id}", get(handlers::get_batch))
        .route("/batches/{id}", put(handlers::update_batch))
        .route("/batches/{id}", patch(handlers::update_batch))
        .route("/batches/{id}", delete(handlers::delete_batch))
        .route("/batches/{id}/status", put(handlers::update_batch_status))
        // Processing decisions
        .route("/processing-decisions", get(handlers::list_decisions))
        .route("/processing-decisions", post(handlers::create_decision))
        .route("/processing-decisions/{id}", get(handlers::get_decision))
        // Pressing rooms
        .route("/pressing-rooms", get(handlers::list_rooms))
        .route("/pressing-rooms", post(handlers::create_room))
        .route("/pressing-rooms/{id}", get(handlers::get_room))
        .route("/pressing-rooms/{id}", put(handlers::update_room))
        // Pressing sessions
        .route("/pressing-sessions", get(handlers::list_sessions))
        .route("/pressing-sessions", post(handlers::start_session))
        .route("/pressing-sessions/{id}", get(handlers::get_session))
        .route(
            "/pressing-sessions/{id}/finish",
            put(handlers::finish_session),
        )
        // Oil batches
        .route("/oil-batches", get(handlers::list_oil_batches))
        .route("/oil-batches", post(handlers::create_oil_batch))
        .route("/oil-batches/{id}", get(handlers::get_oil_batch))
        .route(
            "/oil-batches/{id}/traceability",
            get(handlers::get_oil_batch_traceability),
        )
        // Quality tests
        .route("/quality-tests", get(handlers::list_quality_tests))
        .route("/quality-tests", post(handlers::create_quality_test))
        .route("/quality-tests/{id}", get(handlers::get_quality_test))
        // Containers
        .route("/containers", get(handlers::list_containers))
        .route("/containers", post(handlers::create_container))
        .route(
            "/containers/{id}/contents",
            get(handlers::list_container_contents),
        )
        .route(
            "/containers/{id}/transactions",
            post(handlers::container_transaction),
        )
        // Prices
        .route("/prices", get(handlers::list_prices))
        .route("/prices", post(handlers::create_price))
        .route("/prices/{date}", get(handlers::get_price_by_date))
        // Invoices
        .route("/invoices", get(handlers::list_invoices))
        .route("/invoices", post(handlers::create_invoice))
        .route("/invoices/{id}", get(handlers::get_invoice))
        .route("/invoices/{id}/status", put(handlers::update_invoice_status))
        // Payments
        .route("/payments", get(handlers::list_payments))
        .route("/payments", post(handlers::record_payment))
        // Employees
        .route("/employees", get(handlers::list_employees))
        .route("/employees", post(handlers::create_employee))
        .route("/employees/{id}", get(handlers::get_employee))
        .route("/employees/{id}", put(handlers::update_employee))
        // Dashboard
        .route("/dashboard/overview", get(handlers::dashboard_overview))
        .route(
            "/dashboard/production-summary",
            get(handlers::production_summary),
        )
        .route(
            "/dashboard/financial-summary",
            get(handlers::financial_summary),
        )
        .route("/dashboard/activity", get(handlers::recent_activity))
        .route("/dashboard/shift", get(handlers::shift_status))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api", public.merge(protected))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
