//! HTTP API Layer
//!
//! This crate provides the REST API for the customer registry using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for customers, users and health
//! - **Middleware**: Request ids, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(customer_service, user_service);
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    http::HeaderName,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use domain_bank::UserService;
use domain_customer::CustomerService;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{customer, health, user};
use crate::middleware::{audit_middleware, REQUEST_ID_HEADER};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub customers: Arc<CustomerService>,
    pub users: Arc<UserService>,
}

impl AppState {
    pub fn new(customers: CustomerService, users: UserService) -> Self {
        Self {
            customers: Arc::new(customers),
            users: Arc::new(users),
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Services the handlers delegate to
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    // Public routes
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Customer routes
    let customer_routes = Router::new()
        .route("/", get(customer::list_customers).post(customer::create_customer))
        .route(
            "/:id",
            get(customer::get_customer)
                .put(customer::update_customer)
                .delete(customer::delete_customer),
        );

    // User routes
    let user_routes = Router::new()
        .route("/", post(user::create_user))
        .route("/:id", get(user::get_user));

    let api_routes = Router::new()
        .nest("/clientes", customer_routes)
        .nest("/users", user_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    // Combine all routes; the request id is set before tracing and the audit log read it
    Router::new()
        .merge(health_routes)
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
