use axum::http::StatusCode;
use axum_test::TestServer;
use olive_mill::api::{create_router, AuthConfig};
use olive_mill::db::Database;
use olive_mill::models::*;
use serde_json::json;

fn setup() -> TestServer {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    let app = create_router(db, AuthConfig::with_secret("test-secret"));
    TestServer::new(app).expect("Failed to create test server")
}

async fn auth_token(server: &TestServer) -> String {
    server
        .post("/api/auth/register")
        .json(&json!({
            "email": "admin@mill.example",
            "password": "password123",
            "role": "admin"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "email": "admin@mill.example",
            "password": "password123"
        }))
        .await;
    response.assert_status_ok();
    response.json::<LoginResponse>().token
}

async fn create_test_client(server: &TestServer, token: &str) -> Client {
    server
        .post("/api/clients")
        .authorization_bearer(token)
        .json(&CreateClientInput {
            firstname: "Khalil".to_string(),
            lastname: "Nasser".to_string(),
            phone: "0599123456".to_string(),
            address: None,
        })
        .await
        .json::<Client>()
}

async fn create_test_batch(server: &TestServer, token: &str, client_id: i64) -> BatchWithClient {
    server
        .post("/api/batches")
        .authorization_bearer(token)
        .json(&json!({
            "clientId": client_id,
            "weight_in": 1200,
            "weight_out": 200,
            "net_weight": 1000,
            "number_of_boxes": 40
        }))
        .await
        .json::<BatchWithClient>()
}

mod auth {
    use super::*;

    #[tokio::test]
    async fn register_rejects_missing_credentials() {
        let server = setup();
        let response = server
            .post("/api/auth/register")
            .json(&json!({ "email": "", "password": "" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("required"));
    }

    #[tokio::test]
    async fn register_rejects_unknown_roles() {
        let server = setup();
        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "email": "x@mill.example",
                "password": "secret123",
                "role": "superuser"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("Invalid role"));
    }

    #[tokio::test]
    async fn register_accepts_arabic_role_names() {
        let server = setup();
        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "email": "mudeer@mill.example",
                "password": "secret123",
                "role": "مدير"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let user: UserView = response.json();
        assert_eq!(user.role, UserRole::Manager);
        assert_eq!(user.role_ar, "مدير");
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let server = setup();
        let _token = auth_token(&server).await;
        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "email": "admin@mill.example",
                "password": "another-pass"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("already registered"));
    }

    #[tokio::test]
    async fn login_rejects_bad_password() {
        let server = setup();
        let _token = auth_token(&server).await;
        let response = server
            .post("/api/auth/login")
            .json(&json!({
                "email": "admin@mill.example",
                "password": "wrong-password"
            }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let server = setup();
        let response = server.get("/api/clients").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert!(response.text().contains("No token provided"));

        let response = server
            .get("/api/clients")
            .authorization_bearer("not-a-real-token")
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert!(response.text().contains("Invalid token"));
    }

    #[tokio::test]
    async fn profile_returns_the_authenticated_user() {
        let server = setup();
        let token = auth_token(&server).await;
        let response = server
            .get("/api/auth/profile")
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();
        let user: UserView = response.json();
        assert_eq!(user.email, "admin@mill.example");
        assert_eq!(user.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn health_is_public() {
        let server = setup();
        server.get("/api/health").await.assert_status_ok();
    }
}

mod clients {
    use super::*;

    #[tokio::test]
    async fn create_get_update_delete_round_trip() {
        let server = setup();
        let token = auth_token(&server).await;

        let client = create_test_client(&server, &token).await;
        assert_eq!(client.firstname, "Khalil");

        let fetched: Client = server
            .get(&format!("/api/clients/{}", client.id))
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(fetched.id, client.id);

        let updated: Client = server
            .put(&format!("/api/clients/{}", client.id))
            .authorization_bearer(&token)
            .json(&json!({ "phone": "0598765432" }))
            .await
            .json();
        assert_eq!(updated.phone, "0598765432");
        assert_eq!(updated.firstname, "Khalil");

        server
            .delete(&format!("/api/clients/{}", client.id))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("/api/clients/{}", client.id))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_supports_search_and_pagination() {
        let server = setup();
        let token = auth_token(&server).await;

        for (first, last) in [("Omar", "Saleh"), ("Omar", "Hamdan"), ("Lina", "Saleh")] {
            server
                .post("/api/clients")
                .authorization_bearer(&token)
                .json(&json!({
                    "firstname": first,
                    "lastname": last,
                    "phone": "0599000000"
                }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let page: ClientPage = server
            .get("/api/clients?search=Omar")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(page.pagination.total, 2);

        let page: ClientPage = server
            .get("/api/clients?page=1&limit=2")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(page.clients.len(), 2);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.pages, 2);
    }

    #[tokio::test]
    async fn create_requires_names() {
        let server = setup();
        let token = auth_token(&server).await;
        server
            .post("/api/clients")
            .authorization_bearer(&token)
            .json(&json!({ "firstname": "", "lastname": "", "phone": "1" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

mod batches {
    use super::*;

    #[tokio::test]
    async fn create_starts_received_and_embeds_the_client() {
        let server = setup();
        let token = auth_token(&server).await;
        let client = create_test_client(&server, &token).await;

        let batch = create_test_batch(&server, &token, client.id).await;
        assert_eq!(batch.batch.status, BatchStatus::Received);
        assert_eq!(batch.batch.net_weight, 1000);
        assert_eq!(batch.client.as_ref().map(|c| c.id), Some(client.id));
    }

    #[tokio::test]
    async fn create_rejects_unknown_client() {
        let server = setup();
        let token = auth_token(&server).await;
        let response = server
            .post("/api/batches")
            .authorization_bearer(&token)
            .json(&json!({
                "clientId": 9999,
                "net_weight": 100,
                "number_of_boxes": 4
            }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().contains("Client not found"));
    }

    #[tokio::test]
    async fn patch_accepts_the_scanner_camel_case_fields() {
        let server = setup();
        let token = auth_token(&server).await;
        let client = create_test_client(&server, &token).await;
        let batch = create_test_batch(&server, &token, client.id).await;

        let response = server
            .patch(&format!("/api/batches/{}", batch.batch.id))
            .authorization_bearer(&token)
            .json(&json!({
                "weightOut": 250,
                "isPaid": true,
                "paymentMethod": "cash",
                "unitPrice": 3
            }))
            .await;
        response.assert_status_ok();
        let updated: BatchWithClient = response.json();
        assert_eq!(updated.batch.weight_out, Some(250));
        assert!(updated.batch.is_paid);
        assert_eq!(updated.batch.payment_method, Some(PaymentMethod::Cash));
        assert_eq!(updated.batch.unit_price, Some(3));
    }

    #[tokio::test]
    async fn status_endpoint_moves_the_lifecycle() {
        let server = setup();
        let token = auth_token(&server).await;
        let client = create_test_client(&server, &token).await;
        let batch = create_test_batch(&server, &token, client.id).await;

        let updated: Batch = server
            .put(&format!("/api/batches/{}/status", batch.batch.id))
            .authorization_bearer(&token)
            .json(&json!({ "status": "completed" }))
            .await
            .json();
        assert_eq!(updated.status, BatchStatus::Completed);
    }

    #[tokio::test]
    async fn list_filters_by_status_and_client() {
        let server = setup();
        let token = auth_token(&server).await;
        let client = create_test_client(&server, &token).await;
        let batch = create_test_batch(&server, &token, client.id).await;
        create_test_batch(&server, &token, client.id).await;

        server
            .put(&format!("/api/batches/{}/status", batch.batch.id))
            .authorization_bearer(&token)
            .json(&json!({ "status": "completed" }))
            .await
            .assert_status_ok();

        let page: BatchPage = server
            .get("/api/batches?status=completed")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(page.pagination.total, 1);

        let page: BatchPage = server
            .get(&format!("/api/batches?clientId={}", client.id))
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(page.pagination.total, 2);

        server
            .get("/api/batches?status=bogus")
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

mod processing_decisions {
    use super::*;

    #[tokio::test]
    async fn recording_a_decision_flips_the_batch_to_in_process() {
        let server = setup();
        let token = auth_token(&server).await;
        let client = create_test_client(&server, &token).await;
        let batch = create_test_batch(&server, &token, client.id).await;

        let decision: ProcessingDecision = server
            .post("/api/processing-decisions")
            .authorization_bearer(&token)
            .json(&json!({
                "batchId": batch.batch.id,
                "type": "milling",
                "unit_price": 2
            }))
            .await
            .json();
        assert_eq!(decision.decision_type, DecisionType::Milling);

        let refreshed: BatchWithClient = server
            .get(&format!("/api/batches/{}", batch.batch.id))
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(refreshed.batch.status, BatchStatus::InProcess);
    }

    #[tokio::test]
    async fn completed_batches_cannot_take_new_decisions() {
        let server = setup();
        let token = auth_token(&server).await;
        let client = create_test_client(&server, &token).await;
        let batch = create_test_batch(&server, &token, client.id).await;

        server
            .put(&format!("/api/batches/{}/status", batch.batch.id))
            .authorization_bearer(&token)
            .json(&json!({ "status": "completed" }))
            .await
            .assert_status_ok();

        let response = server
            .post("/api/processing-decisions")
            .authorization_bearer(&token)
            .json(&json!({ "batchId": batch.batch.id, "type": "selling" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("already processed"));
    }
}

mod pressing {
    use super::*;

    async fn create_room(server: &TestServer, token: &str) -> PressingRoom {
        server
            .post("/api/pressing-rooms")
            .authorization_bearer(token)
            .json(&json!({ "name": "غرفة العصر ١", "capacity": 60 }))
            .await
            .json::<PressingRoom>()
    }

    #[tokio::test]
    async fn rooms_start_inactive_and_activate_with_a_session() {
        let server = setup();
        let token = auth_token(&server).await;
        let room = create_room(&server, &token).await;

        let fetched: RoomWithStatus = server
            .get(&format!("/api/pressing-rooms/{}", room.id))
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(fetched.status, RoomStatus::Inactive);

        server
            .post("/api/pressing-sessions")
            .authorization_bearer(&token)
            .json(&json!({ "pressing_room_id": room.id, "number_of_boxes": 30 }))
            .await
            .assert_status(StatusCode::CREATED);

        let fetched: RoomWithStatus = server
            .get(&format!("/api/pressing-rooms/{}", room.id))
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(fetched.status, RoomStatus::Active);
    }

    #[tokio::test]
    async fn a_busy_room_rejects_a_second_session() {
        let server = setup();
        let token = auth_token(&server).await;
        let room = create_room(&server, &token).await;

        server
            .post("/api/pressing-sessions")
            .authorization_bearer(&token)
            .json(&json!({ "pressing_room_id": room.id, "number_of_boxes": 30 }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/api/pressing-sessions")
            .authorization_bearer(&token)
            .json(&json!({ "pressing_room_id": room.id, "number_of_boxes": 10 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("already in use"));
    }

    #[tokio::test]
    async fn finishing_a_session_frees_the_room_and_is_one_shot() {
        let server = setup();
        let token = auth_token(&server).await;
        let room = create_room(&server, &token).await;

        let session: SessionWithRoom = server
            .post("/api/pressing-sessions")
            .authorization_bearer(&token)
            .json(&json!({ "pressing_room_id": room.id, "number_of_boxes": 30 }))
            .await
            .json();

        let finished: PressingSession = server
            .put(&format!("/api/pressing-sessions/{}/finish", session.session.id))
            .authorization_bearer(&token)
            .await
            .json();
        assert!(finished.finish.is_some());

        let response = server
            .put(&format!("/api/pressing-sessions/{}/finish", session.session.id))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("already finished"));

        let fetched: RoomWithStatus = server
            .get(&format!("/api/pressing-rooms/{}", room.id))
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(fetched.status, RoomStatus::Inactive);
    }

    #[tokio::test]
    async fn sessions_in_unknown_rooms_are_rejected() {
        let server = setup();
        let token = auth_token(&server).await;
        let response = server
            .post("/api/pressing-sessions")
            .authorization_bearer(&token)
            .json(&json!({ "pressing_room_id": 404, "number_of_boxes": 5 }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}

mod oil_and_quality {
    use super::*;

    async fn produce_oil(server: &TestServer, token: &str) -> OilBatch {
        server
            .post("/api/oil-batches")
            .authorization_bearer(token)
            .json(&json!({ "weight": 180, "residue": 40 }))
            .await
            .json::<OilBatch>()
    }

    #[tokio::test]
    async fn tested_filter_splits_oil_batches() {
        let server = setup();
        let token = auth_token(&server).await;
        let tested = produce_oil(&server, &token).await;
        let _untested = produce_oil(&server, &token).await;

        server
            .post("/api/quality-tests")
            .authorization_bearer(&token)
            .json(&json!({
                "oil_batch_id": tested.id,
                "acidity_level": 0.4,
                "grade": "extra_virgin"
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let with_tests: Vec<OilBatchWithTests> = server
            .get("/api/oil-batches?tested=true")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(with_tests.len(), 1);
        assert_eq!(with_tests[0].oil_batch.id, tested.id);
        assert_eq!(with_tests[0].quality_tests[0].grade, OilGrade::ExtraVirgin);

        let without_tests: Vec<OilBatchWithTests> = server
            .get("/api/oil-batches?tested=false")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(without_tests.len(), 1);
    }

    #[tokio::test]
    async fn quality_tests_require_an_existing_oil_batch() {
        let server = setup();
        let token = auth_token(&server).await;
        let response = server
            .post("/api/quality-tests")
            .authorization_bearer(&token)
            .json(&json!({ "oil_batch_id": 77, "grade": "virgin" }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn traceability_walks_the_full_chain() {
        let server = setup();
        let token = auth_token(&server).await;
        let client = create_test_client(&server, &token).await;
        let batch = create_test_batch(&server, &token, client.id).await;

        let room: PressingRoom = server
            .post("/api/pressing-rooms")
            .authorization_bearer(&token)
            .json(&json!({ "name": "غرفة ٢" }))
            .await
            .json();
        let session: SessionWithRoom = server
            .post("/api/pressing-sessions")
            .authorization_bearer(&token)
            .json(&json!({ "pressing_room_id": room.id, "number_of_boxes": 40 }))
            .await
            .json();

        server
            .post("/api/processing-decisions")
            .authorization_bearer(&token)
            .json(&json!({ "batchId": batch.batch.id, "type": "milling" }))
            .await
            .assert_status(StatusCode::CREATED);

        let oil: OilBatch = server
            .post("/api/oil-batches")
            .authorization_bearer(&token)
            .json(&json!({
                "weight": 200,
                "batchId": batch.batch.id,
                "pressing_session_id": session.session.id
            }))
            .await
            .json();

        let trace: OilBatchTraceability = server
            .get(&format!("/api/oil-batches/{}/traceability", oil.id))
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(trace.batch.as_ref().map(|b| b.id), Some(batch.batch.id));
        assert_eq!(trace.client.as_ref().map(|c| c.id), Some(client.id));
        assert_eq!(trace.processing_decisions.len(), 1);
        assert_eq!(
            trace.pressing_room.as_ref().map(|r| r.id),
            Some(room.id)
        );
    }
}

mod containers {
    use super::*;

    async fn create_container(server: &TestServer, token: &str) -> ContainerView {
        server
            .post("/api/containers")
            .authorization_bearer(token)
            .json(&json!({ "label": "خزان أ", "capacity": 5000 }))
            .await
            .json::<ContainerView>()
    }

    #[tokio::test]
    async fn transactions_move_the_ledger_and_sells_clamp_at_zero() {
        let server = setup();
        let token = auth_token(&server).await;
        let container = create_container(&server, &token).await;
        assert_eq!(container.current_weight, 0);

        let after_add: ContainerView = server
            .post(&format!("/api/containers/{}/transactions", container.id))
            .authorization_bearer(&token)
            .json(&json!({ "type": "add", "weight": 300 }))
            .await
            .json();
        assert_eq!(after_add.current_weight, 300);

        let after_sell: ContainerView = server
            .post(&format!("/api/containers/{}/transactions", container.id))
            .authorization_bearer(&token)
            .json(&json!({ "type": "sell", "weight": 500, "pricePerKg": 12 }))
            .await
            .json();
        assert_eq!(after_sell.current_weight, 0);

        let listed: Vec<ContainerView> = server
            .get("/api/containers")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].current_weight, 0);
    }

    #[tokio::test]
    async fn the_content_ledger_lists_every_movement_newest_first() {
        let server = setup();
        let token = auth_token(&server).await;
        let container = create_container(&server, &token).await;

        for body in [
            json!({ "type": "add", "weight": 300 }),
            json!({ "type": "sell", "weight": 500, "pricePerKg": 12 }),
        ] {
            server
                .post(&format!("/api/containers/{}/transactions", container.id))
                .authorization_bearer(&token)
                .json(&body)
                .await
                .assert_status_ok();
        }

        let ledger: Vec<ContainerContent> = server
            .get(&format!("/api/containers/{}/contents", container.id))
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(ledger.len(), 2);
        // Newest first: the clamped sell, valued at 500kg * 12.
        assert_eq!(ledger[0].total_weight, 0);
        assert_eq!(ledger[0].value, Some(6000));
        assert_eq!(ledger[0].currency.as_deref(), Some("SAR"));
        assert_eq!(ledger[1].total_weight, 300);
        assert_eq!(ledger[1].value, None);
        assert_eq!(ledger[1].container_id, container.id);

        server
            .get("/api/containers/99/contents")
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn transactions_on_unknown_containers_404() {
        let server = setup();
        let token = auth_token(&server).await;
        server
            .post("/api/containers/99/transactions")
            .authorization_bearer(&token)
            .json(&json!({ "type": "add", "weight": 10 }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

mod prices {
    use super::*;

    #[tokio::test]
    async fn one_price_row_per_date() {
        let server = setup();
        let token = auth_token(&server).await;
        let body = json!({
            "date": "2024-11-15",
            "milling_price_per_kg": 2,
            "oil_client_selling_price_per_kg": 25,
            "oil_export_selling_price_per_kg": 30,
            "olive_buying_price_per_kg": 4
        });

        server
            .post("/api/prices")
            .authorization_bearer(&token)
            .json(&body)
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/api/prices")
            .authorization_bearer(&token)
            .json(&body)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("already exists"));
    }

    #[tokio::test]
    async fn latest_returns_the_newest_row() {
        let server = setup();
        let token = auth_token(&server).await;
        for (date, milling) in [("2024-11-14", 2), ("2024-11-15", 3)] {
            server
                .post("/api/prices")
                .authorization_bearer(&token)
                .json(&json!({
                    "date": date,
                    "milling_price_per_kg": milling,
                    "oil_client_selling_price_per_kg": 25,
                    "oil_export_selling_price_per_kg": 30,
                    "olive_buying_price_per_kg": 4
                }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let latest: Price = server
            .get("/api/prices?latest=true")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(latest.milling_price_per_kg, 3);

        let all: Vec<Price> = server
            .get("/api/prices")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(all.len(), 2);

        let by_date: Price = server
            .get("/api/prices/2024-11-14")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(by_date.milling_price_per_kg, 2);

        server
            .get("/api/prices/2024-01-01")
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

mod billing {
    use super::*;

    async fn create_invoice(server: &TestServer, token: &str, client_id: i64) -> Invoice {
        server
            .post("/api/invoices")
            .authorization_bearer(token)
            .json(&json!({
                "clientId": client_id,
                "amount": 100,
                "due_date": "2025-01-31"
            }))
            .await
            .json::<Invoice>()
    }

    #[tokio::test]
    async fn invoices_start_as_drafts_with_a_server_issue_date() {
        let server = setup();
        let token = auth_token(&server).await;
        let client = create_test_client(&server, &token).await;

        let invoice = create_invoice(&server, &token, client.id).await;
        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert_eq!(invoice.issue_date, chrono::Utc::now().date_naive());
    }

    #[tokio::test]
    async fn payments_mark_the_invoice_paid_once_covered() {
        let server = setup();
        let token = auth_token(&server).await;
        let client = create_test_client(&server, &token).await;
        let invoice = create_invoice(&server, &token, client.id).await;

        server
            .post("/api/payments")
            .authorization_bearer(&token)
            .json(&json!({ "invoiceId": invoice.id, "amount": 40 }))
            .await
            .assert_status(StatusCode::CREATED);

        let partial: Invoice = server
            .get(&format!("/api/invoices/{}", invoice.id))
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(partial.status, InvoiceStatus::Draft);

        server
            .post("/api/payments")
            .authorization_bearer(&token)
            .json(&json!({ "invoiceId": invoice.id, "amount": 60, "payment_method": "cash" }))
            .await
            .assert_status(StatusCode::CREATED);

        let paid: Invoice = server
            .get(&format!("/api/invoices/{}", invoice.id))
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(paid.status, InvoiceStatus::Paid);

        let payments: Vec<Payment> = server
            .get(&format!("/api/payments?invoiceId={}", invoice.id))
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(payments.len(), 2);
    }

    #[tokio::test]
    async fn payments_against_unknown_invoices_404() {
        let server = setup();
        let token = auth_token(&server).await;
        server
            .post("/api/payments")
            .authorization_bearer(&token)
            .json(&json!({ "invoiceId": 777, "amount": 10 }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn status_transitions_are_explicit() {
        let server = setup();
        let token = auth_token(&server).await;
        let client = create_test_client(&server, &token).await;
        let invoice = create_invoice(&server, &token, client.id).await;

        let sent: Invoice = server
            .put(&format!("/api/invoices/{}/status", invoice.id))
            .authorization_bearer(&token)
            .json(&json!({ "status": "sent" }))
            .await
            .json();
        assert_eq!(sent.status, InvoiceStatus::Sent);

        let page: InvoicePage = server
            .get("/api/invoices?status=sent")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(page.pagination.total, 1);
    }
}

mod employees {
    use super::*;

    #[tokio::test]
    async fn employees_start_active_and_filter_by_role() {
        let server = setup();
        let token = auth_token(&server).await;

        let employee: Employee = server
            .post("/api/employees")
            .authorization_bearer(&token)
            .json(&json!({
                "firstname": "Rana",
                "lastname": "Aboud",
                "role": "quality_tester",
                "hire_date": "2024-10-01"
            }))
            .await
            .json();
        assert!(employee.active);

        let testers: Vec<Employee> = server
            .get("/api/employees?role=quality_tester")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(testers.len(), 1);

        let deactivated: Employee = server
            .put(&format!("/api/employees/{}", employee.id))
            .authorization_bearer(&token)
            .json(&json!({ "active": false }))
            .await
            .json();
        assert!(!deactivated.active);

        let active: Vec<Employee> = server
            .get("/api/employees?active=true")
            .authorization_bearer(&token)
            .await
            .json();
        assert!(active.is_empty());
    }
}

mod dashboard {
    use super::*;

    #[tokio::test]
    async fn overview_reflects_created_entities() {
        let server = setup();
        let token = auth_token(&server).await;
        let client = create_test_client(&server, &token).await;
        create_test_batch(&server, &token, client.id).await;

        let overview: DashboardOverview = server
            .get("/api/dashboard/overview")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(overview.total_clients, 1);
        assert_eq!(overview.active_batches, 1);
        assert_eq!(overview.today_tickets, 1);
    }

    #[tokio::test]
    async fn activity_feed_lists_recent_events() {
        let server = setup();
        let token = auth_token(&server).await;
        let client = create_test_client(&server, &token).await;
        create_test_batch(&server, &token, client.id).await;

        let events: Vec<ActivityEvent> = server
            .get("/api/dashboard/activity?limit=5")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(events.len(), 2);
    }

    #[tokio::test]
    async fn production_summary_counts_recent_oil() {
        let server = setup();
        let token = auth_token(&server).await;
        server
            .post("/api/oil-batches")
            .authorization_bearer(&token)
            .json(&json!({ "weight": 120 }))
            .await
            .assert_status(StatusCode::CREATED);

        let summary: ProductionSummary = server
            .get("/api/dashboard/production-summary?period=7")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(summary.period_days, 7);
        assert_eq!(summary.production.len(), 1);
        assert_eq!(summary.production[0].total_oil, 120);
    }

    #[tokio::test]
    async fn financial_rejects_a_bad_month() {
        let server = setup();
        let token = auth_token(&server).await;
        server
            .get("/api/dashboard/financial-summary?month=13")
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn shift_endpoint_reports_the_operational_day() {
        let server = setup();
        let token = auth_token(&server).await;
        let response = server
            .get("/api/dashboard/shift")
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        let label = body["shift_label"].as_str().unwrap();
        assert!(label == "نوبة ليلية" || label == "نوبة نهارية");
        assert!(body["day"]["progress_percent"].as_f64().unwrap() <= 100.0);
    }
}
