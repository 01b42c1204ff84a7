//! HTTP-level tests of the router over in-memory stores

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use core_kernel::{
    AdapterHealth, CustomerId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_bank::{MockUserStore, UserService};
use domain_customer::{
    Address, Customer, CustomerDraft, CustomerService, CustomerStore, LookupFailure,
    MockAddressLookup, MockCustomerStore,
};
use interface_api::dto::customer::CustomerResponse;
use interface_api::dto::user::UserResponse;
use interface_api::{create_router, AppState};
use test_utils::{AddressFixtures, UserFixtures};

struct Api {
    server: TestServer,
    lookup: Arc<MockAddressLookup>,
    store: Arc<MockCustomerStore>,
}

impl Api {
    fn new() -> Self {
        Self::with_lookup(
            MockAddressLookup::new()
                .with_address(AddressFixtures::praca_da_se())
                .with_address(AddressFixtures::avenida_paulista()),
        )
    }

    fn with_lookup(lookup: MockAddressLookup) -> Self {
        let lookup = Arc::new(lookup);
        let store = Arc::new(MockCustomerStore::new());
        let customers = CustomerService::new(store.clone(), lookup.clone());
        let users = UserService::new(Arc::new(MockUserStore::new()));

        let server = TestServer::new(create_router(AppState::new(customers, users)))
            .expect("Failed to start test server");

        Self {
            server,
            lookup,
            store,
        }
    }

    async fn create_customer(&self, name: &str, postal_code: &str) -> CustomerResponse {
        let response = self
            .server
            .post("/clientes")
            .json(&json!({ "name": name, "postal_code": postal_code }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<CustomerResponse>()
    }
}

/// Store whose database is gone
struct UnreachableStore;

impl DomainPort for UnreachableStore {}

#[async_trait]
impl HealthCheckable for UnreachableStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::new("unreachable", AdapterHealth::Unhealthy, 0)
            .with_message("connection refused")
    }
}

#[async_trait]
impl CustomerStore for UnreachableStore {
    async fn find_all(&self) -> Result<Vec<Customer>, PortError> {
        Err(PortError::connection("connection refused"))
    }

    async fn find_by_id(&self, _id: CustomerId) -> Result<Option<Customer>, PortError> {
        Err(PortError::connection("connection refused"))
    }

    async fn find_address_by_postal_code(&self, _code: &str) -> Result<Option<Address>, PortError> {
        Err(PortError::connection("connection refused"))
    }

    async fn insert(&self, _draft: CustomerDraft) -> Result<Customer, PortError> {
        Err(PortError::connection("connection refused"))
    }

    async fn update(
        &self,
        _id: CustomerId,
        _draft: CustomerDraft,
    ) -> Result<Option<Customer>, PortError> {
        Err(PortError::connection("connection refused"))
    }

    async fn delete(&self, _id: CustomerId) -> Result<bool, PortError> {
        Err(PortError::connection("connection refused"))
    }
}

fn unreachable_server() -> TestServer {
    let customers = CustomerService::new(
        Arc::new(UnreachableStore),
        Arc::new(MockAddressLookup::new()),
    );
    let users = UserService::new(Arc::new(MockUserStore::new()));
    TestServer::new(create_router(AppState::new(customers, users)))
        .expect("Failed to start test server")
}

// ============================================================================
// Customers
// ============================================================================

mod customer_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_returns_enriched_customer() {
        let api = Api::new();

        let ana = api.create_customer("Ana", AddressFixtures::SE).await;

        assert_eq!(ana.name, "Ana");
        assert_eq!(ana.postal_code, AddressFixtures::SE);
        assert_eq!(ana.address.street.as_deref(), Some("Praça da Sé"));
        assert_eq!(ana.address.neighborhood.as_deref(), Some("Sé"));
        assert_eq!(ana.address.city.as_deref(), Some("São Paulo"));
        assert_eq!(ana.address.state.as_deref(), Some("SP"));
    }

    #[tokio::test]
    async fn test_response_uses_snake_case_fields() {
        let api = Api::new();
        api.create_customer("Ana", AddressFixtures::SE).await;

        let body: Value = api.server.get("/clientes").await.json();
        let first = &body[0];

        assert!(first.get("postal_code").is_some());
        assert!(first["address"].get("neighborhood").is_some());
        assert!(first["address"].get("id").is_some());
    }

    #[tokio::test]
    async fn test_get_list_update_delete_flow() {
        let api = Api::new();
        let ana = api.create_customer("Ana", AddressFixtures::SE).await;
        let path = format!("/clientes/{}", ana.id);

        let fetched: CustomerResponse = api.server.get(&path).await.json();
        assert_eq!(fetched, ana);

        let updated = api
            .server
            .put(&path)
            .json(&json!({ "name": "Ana Maria", "postal_code": AddressFixtures::PAULISTA }))
            .await;
        updated.assert_status_ok();
        let updated: CustomerResponse = updated.json();
        assert_eq!(updated.id, ana.id);
        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.address.street.as_deref(), Some("Avenida Paulista"));

        let list: Vec<CustomerResponse> = api.server.get("/clientes").await.json();
        assert_eq!(list.len(), 1);

        api.server
            .delete(&path)
            .await
            .assert_status(StatusCode::NO_CONTENT);
        api.server.get(&path).await.assert_status_not_found();
        assert_eq!(api.store.address_count().await, 2);
    }

    #[tokio::test]
    async fn test_prefixed_identifier_is_accepted() {
        let api = Api::new();
        let ana = api.create_customer("Ana", AddressFixtures::SE).await;

        api.server
            .get(&format!("/clientes/CUS-{}", ana.id))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_malformed_identifier_is_bad_request() {
        let api = Api::new();

        let response = api.server.get("/clientes/not-a-number").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_missing_customer_is_not_found() {
        let api = Api::new();

        let response = api.server.get("/clientes/999").await;

        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_update_of_missing_customer_performs_no_lookup() {
        let api = Api::new();

        api.server
            .put("/clientes/999")
            .json(&json!({ "name": "Ghost", "postal_code": AddressFixtures::SE }))
            .await
            .assert_status_not_found();

        assert_eq!(api.lookup.call_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_of_missing_customer_is_not_found() {
        let api = Api::new();
        api.server.delete("/clientes/999").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_unknown_postal_code_is_unprocessable() {
        let api = Api::new();

        let response = api
            .server
            .post("/clientes")
            .json(&json!({ "name": "Davi", "postal_code": AddressFixtures::UNKNOWN }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["error"], "postal_code_not_found");
        assert_eq!(api.store.customer_count().await, 0);
    }

    #[tokio::test]
    async fn test_provider_failure_is_bad_gateway() {
        let api = Api::with_lookup(MockAddressLookup::new().failing(LookupFailure::Unavailable));

        let response = api
            .server
            .post("/clientes")
            .json(&json!({ "name": "Ana", "postal_code": AddressFixtures::SE }))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert_eq!(body["error"], "upstream_error");
        assert_eq!(api.store.customer_count().await, 0);
        assert_eq!(api.store.address_count().await, 0);
    }

    #[tokio::test]
    async fn test_second_customer_with_same_code_reuses_address() {
        let api = Api::new();

        let ana = api.create_customer("Ana", AddressFixtures::SE).await;
        let bruno = api.create_customer("Bruno", AddressFixtures::SE).await;

        assert_eq!(ana.address.id, bruno.address.id);
        assert_eq!(api.lookup.call_count(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error_without_details() {
        let server = unreachable_server();

        let response = server.get("/clientes").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"], "internal_error");
        assert!(!body["message"].as_str().unwrap_or_default().contains("refused"));
    }
}

// ============================================================================
// Users
// ============================================================================

mod user_tests {
    use super::*;

    fn rosa_body() -> Value {
        let rosa = UserFixtures::rosa();
        json!({
            "name": rosa.name,
            "account": {
                "number": rosa.account.number,
                "agency": rosa.account.agency,
                "balance": "1500.25",
                "limit": "500.00"
            },
            "card": { "number": rosa.card.number, "limit": "1000.00" }
        })
    }

    #[tokio::test]
    async fn test_create_and_fetch_user() {
        let api = Api::new();

        let created = api.server.post("/users").json(&rosa_body()).await;
        created.assert_status(StatusCode::CREATED);
        let created: UserResponse = created.json();
        assert_eq!(created.account.balance, dec!(1500.25));

        let fetched: UserResponse = api
            .server
            .get(&format!("/users/{}", created.id))
            .await
            .json();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_duplicate_account_is_conflict() {
        let api = Api::new();
        api.server
            .post("/users")
            .json(&rosa_body())
            .await
            .assert_status(StatusCode::CREATED);

        let mut impostor = rosa_body();
        impostor["name"] = json!("Impostor");
        let response = api.server.post("/users").json(&impostor).await;

        response.assert_status(StatusCode::CONFLICT);
        let body: Value = response.json();
        assert_eq!(body["error"], "conflict");
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let api = Api::new();
        api.server.get("/users/77").await.assert_status_not_found();
    }
}

// ============================================================================
// Health
// ============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let api = Api::new();
        let body: Value = api.server.get("/health").await.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_with_healthy_stores() {
        let api = Api::new();

        let response = api.server.get("/health/ready").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ready");
        assert_eq!(body["checks"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_readiness_with_unhealthy_store() {
        let server = unreachable_server();

        let response = server.get("/health/ready").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = response.json();
        assert_eq!(body["status"], "unavailable");
    }

    #[tokio::test]
    async fn test_responses_carry_request_id() {
        let api = Api::new();

        let response = api.server.get("/clientes").await;

        let header = response.header("x-request-id");
        assert!(!header.is_empty());
    }
}
