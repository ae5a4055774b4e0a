use std::convert::Infallible;

use http_body_util::Full;
use hyper::Request;
use hyper::Response;
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use taotable_lib::component::{ComponentConfig, ErrorMode, LoadOutcome, TableComponent};
use taotable_lib::model::SortState;
use taotable_lib::registry::factory;
use taotable_lib::template::{TemplateSet, fetch_document};

/// Serves a fixed status and body on an ephemeral port, returning the
/// URL to request.
async fn serve(status: u16, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let service = service_fn(move |_req: Request<hyper::body::Incoming>| async move {
                    let response = Response::builder()
                        .status(status)
                        .header("content-type", "application/json")
                        .body(Full::new(Bytes::from_static(body.as_bytes())))
                        .unwrap();
                    Ok::<_, Infallible>(response)
                });
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    format!("http://{addr}/data.json")
}

fn silent() -> TableComponent {
    TableComponent::new(TemplateSet::builtin())
}

fn surfacing() -> TableComponent {
    TableComponent::with_config(
        TemplateSet::builtin(),
        ComponentConfig::default().with_error_mode(ErrorMode::Surface),
    )
}

fn column_values(component: &TableComponent, column: &str) -> Vec<String> {
    component
        .data()
        .rows()
        .iter()
        .map(|row| row.cell_text(column))
        .collect()
}

// ============================================================================
// Successful loads
// ============================================================================

#[tokio::test]
async fn test_src_attribute_change_loads_data() {
    let url = serve(200, r#"[{"name":"b"},{"name":"a"}]"#).await;
    let component = silent();

    let outcome = component.set_attribute("src", &url).await.unwrap();
    assert_eq!(outcome, Some(LoadOutcome::Applied));
    assert_eq!(column_values(&component, "name"), ["b", "a"]);
    assert_eq!(component.attribute("src").as_deref(), Some(url.as_str()));
}

#[tokio::test]
async fn test_load_resets_active_sort() {
    let url = serve(200, r#"[{"a":3},{"a":2}]"#).await;
    let component = silent();
    component.embed_json(r#"[{"a":2},{"a":1}]"#).unwrap();
    component.click("a").unwrap();

    component.load(&url).await.unwrap();
    assert_eq!(component.sort_state(), SortState::Unsorted);
    assert_eq!(column_values(&component, "a"), ["3", "2"]);
}

#[tokio::test]
async fn test_factory_component_loads_on_connect() {
    let url = serve(200, r#"[{"a":1}]"#).await;
    let component = factory(Some(&url));
    assert!(component.data().is_empty());

    let outcome = component.connected().await.unwrap();
    assert_eq!(outcome, Some(LoadOutcome::Applied));
    assert_eq!(component.data().len(), 1);
}

// ============================================================================
// Template documents
// ============================================================================

#[tokio::test]
async fn test_fetch_document_returns_the_body_verbatim() {
    const DOCUMENT: &str = r#"<template class="tpl-selector">th.<!--FIELDSELECTOR--></template>"#;
    let url = serve(200, DOCUMENT).await;

    let body = fetch_document(&url).await.unwrap();
    assert_eq!(body, DOCUMENT);
}

#[tokio::test]
async fn test_fetch_document_rejects_non_200() {
    let url = serve(404, "gone").await;

    let err = fetch_document(&url).await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}

// ============================================================================
// Failure handling
// ============================================================================

#[tokio::test]
async fn test_non_200_is_swallowed_and_prior_data_retained() {
    let url = serve(404, "gone").await;
    let component = silent();
    component.embed_json(r#"[{"a":1}]"#).unwrap();

    let outcome = component.load(&url).await.unwrap();
    assert_eq!(outcome, LoadOutcome::Failed);
    assert_eq!(column_values(&component, "a"), ["1"]);
    assert!(component.take_last_error().is_some());
}

#[tokio::test]
async fn test_non_200_surfaces_with_status() {
    let url = serve(503, "down").await;
    let component = surfacing();

    let err = component.load(&url).await.unwrap_err();
    match err {
        taotable_lib::Error::Load(load) => assert_eq!(load.status_code(), Some(503)),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_swallowed_and_prior_data_retained() {
    let url = serve(200, "{ not json").await;
    let component = silent();
    component.embed_json(r#"[{"a":1}]"#).unwrap();

    let outcome = component.load(&url).await.unwrap();
    assert_eq!(outcome, LoadOutcome::Failed);
    assert_eq!(column_values(&component, "a"), ["1"]);
}

#[tokio::test]
async fn test_malformed_body_surfaces_as_data_error() {
    let url = serve(200, r#"{"rows": []}"#).await;
    let component = surfacing();

    let err = component.load(&url).await.unwrap_err();
    assert!(matches!(err, taotable_lib::Error::Data(_)));
}

#[tokio::test]
async fn test_network_failure_is_swallowed() {
    // Nothing listens here; connection is refused.
    let component = silent();
    component.embed_json(r#"[{"a":1}]"#).unwrap();

    let outcome = component.load("http://127.0.0.1:9/data.json").await.unwrap();
    assert_eq!(outcome, LoadOutcome::Failed);
    assert_eq!(column_values(&component, "a"), ["1"]);
}
