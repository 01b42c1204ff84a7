//! ViaCepAdapter against a local stub of the provider

use std::time::Duration;

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use tokio::net::TcpListener;

use core_kernel::PortError;
use domain_customer::{AddressLookupPort, ViaCepAdapter, ViaCepConfig};

async fn stub_lookup(Path(code): Path<String>) -> impl IntoResponse {
    match code.as_str() {
        "01001-000" => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"cep":"01001-000","logradouro":"Praça da Sé","complemento":"lado ímpar","bairro":"Sé","localidade":"São Paulo","uf":"SP"}"#,
        )
            .into_response(),
        "99999-999" => (StatusCode::OK, r#"{"erro": true}"#).into_response(),
        "bad" => (StatusCode::BAD_REQUEST, "invalid").into_response(),
        "busy" => (StatusCode::TOO_MANY_REQUESTS, [(header::RETRY_AFTER, "30")], "").into_response(),
        "down" => (StatusCode::SERVICE_UNAVAILABLE, "").into_response(),
        "html" => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            (StatusCode::OK, "{}").into_response()
        }
        _ => (StatusCode::NOT_FOUND, "").into_response(),
    }
}

/// Serves the stub on an ephemeral port and returns its base URL
async fn spawn_stub() -> String {
    let app = Router::new().route("/ws/:code/json", get(stub_lookup));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/ws", addr)
}

async fn adapter(timeout_secs: u64) -> ViaCepAdapter {
    ViaCepAdapter::new(ViaCepConfig {
        base_url: spawn_stub().await,
        timeout_secs,
    })
    .unwrap()
}

#[tokio::test]
async fn test_lookup_maps_provider_fields() {
    let adapter = adapter(5).await;

    let address = adapter.lookup("01001-000").await.unwrap();

    assert_eq!(address.postal_code, "01001-000");
    assert_eq!(address.street.as_deref(), Some("Praça da Sé"));
    assert_eq!(address.complement.as_deref(), Some("lado ímpar"));
    assert_eq!(address.neighborhood.as_deref(), Some("Sé"));
    assert_eq!(address.city.as_deref(), Some("São Paulo"));
    assert_eq!(address.state.as_deref(), Some("SP"));
}

#[tokio::test]
async fn test_error_flag_is_not_found() {
    let error = adapter(5).await.lookup("99999-999").await.unwrap_err();
    assert!(error.is_not_found());
}

#[tokio::test]
async fn test_bad_request_is_not_found() {
    let error = adapter(5).await.lookup("bad").await.unwrap_err();
    assert!(error.is_not_found());
}

#[tokio::test]
async fn test_rate_limit_carries_retry_after() {
    let error = adapter(5).await.lookup("busy").await.unwrap_err();
    assert!(matches!(error, PortError::RateLimited { retry_after_secs: 30 }));
}

#[tokio::test]
async fn test_server_error_is_service_unavailable() {
    let error = adapter(5).await.lookup("down").await.unwrap_err();
    assert!(matches!(error, PortError::ServiceUnavailable { .. }));
    assert!(error.is_transient());
}

#[tokio::test]
async fn test_undecodable_body_is_transformation_error() {
    let error = adapter(5).await.lookup("html").await.unwrap_err();
    assert!(matches!(error, PortError::Transformation { .. }));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let error = adapter(1).await.lookup("slow").await.unwrap_err();
    assert!(matches!(error, PortError::Timeout { duration_ms: 1000, .. }));
}

#[tokio::test]
async fn test_unreachable_provider_is_connection_error() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let adapter = ViaCepAdapter::new(ViaCepConfig {
        base_url: format!("http://{}/ws", addr),
        timeout_secs: 2,
    })
    .unwrap();

    let error = adapter.lookup("01001-000").await.unwrap_err();
    assert!(matches!(error, PortError::Connection { .. }));
}
