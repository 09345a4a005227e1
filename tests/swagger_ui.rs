use std::sync::Arc;

use poem::{
    http::{header, Method, StatusCode, Uri},
    listener::{Acceptor, Listener, TcpListener},
    test::TestClient,
    Endpoint, Request, Route, Server,
};
use poem_swagger::{handler_default, registry, Config, ReadDocError, Registry, SwaggerUi};

const DOC: &str = r#"{"openapi":"3.0.0","info":{"title":"petstore","version":"1.0"},"paths":{}}"#;

fn petstore() -> Arc<Registry> {
    let registry = Registry::new();
    registry.register("petstore", DOC).unwrap();
    Arc::new(registry)
}

// Requests built by the test client carry no original uri, so the mount point
// is passed through `X-Forwarded-Prefix`. `nested_route` covers a real mount.
async fn docs(ui: SwaggerUi) -> TestClient<SwaggerUi> {
    let cli = TestClient::new(ui);
    cli.get("/")
        .header("X-Forwarded-Prefix", "/docs")
        .send()
        .await
        .assert_status(StatusCode::MOVED_PERMANENTLY);
    cli
}

#[tokio::test]
async fn index_page() {
    let cli = docs(SwaggerUi::new(Config::default())).await;

    let resp = cli.get("/index.html").send().await;
    resp.assert_status_is_ok();
    resp.assert_content_type("text/html; charset=utf-8");
    let html = resp.0.into_body().into_string().await.unwrap();
    assert!(html.contains(r#""url":"/docs/doc.json""#));
    assert!(html.contains("SwaggerUIBundle(config)"));
}

#[tokio::test]
async fn index_page_with_explicit_url() {
    let cli = docs(SwaggerUi::new(
        Config::default().url("https://example.com/openapi.json"),
    ))
    .await;

    let resp = cli.get("/index.html").send().await;
    resp.assert_status_is_ok();
    let html = resp.0.into_body().into_string().await.unwrap();
    assert!(html.contains(r#""url":"https://example.com/openapi.json""#));
    assert!(!html.contains("/docs/doc.json"));
}

#[tokio::test]
async fn doc_json() {
    let cli = docs(SwaggerUi::with_registry(
        Config::default().instance_name("petstore"),
        petstore(),
    ))
    .await;

    let resp = cli.get("/doc.json").send().await;
    resp.assert_status_is_ok();
    resp.assert_content_type("application/json");
    resp.assert_text(DOC).await;
}

#[tokio::test]
async fn doc_json_from_global_registry() {
    registry::register("global-petstore", DOC).unwrap();
    let cli = docs(SwaggerUi::new(
        Config::default().instance_name("global-petstore"),
    ))
    .await;

    let resp = cli.get("/doc.json").send().await;
    resp.assert_status_is_ok();
    resp.assert_text(DOC).await;
}

#[tokio::test]
async fn doc_json_missing() {
    let cli = docs(SwaggerUi::with_registry(
        Config::default().instance_name("users"),
        petstore(),
    ))
    .await;

    let resp = cli.get("/doc.json").send().await;
    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    resp.assert_text("no document named `users` was registered")
        .await;
}

#[tokio::test]
async fn doc_json_error_is_passed_through() {
    let ui = SwaggerUi::with_registry(Config::default(), Arc::new(Registry::new()));

    let err = ui
        .call(Request::builder().uri(Uri::from_static("/doc.json")).finish())
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        err.downcast_ref::<ReadDocError>(),
        Some(&ReadDocError::NoneRegistered)
    );
}

#[tokio::test]
async fn redirect() {
    let cli = docs(SwaggerUi::new(Config::default())).await;

    let resp = cli.get("/").send().await;
    resp.assert_status(StatusCode::MOVED_PERMANENTLY);
    resp.assert_header(header::LOCATION, "/docs/index.html");
    resp.assert_text("").await;

    let resp = cli.head("/").send().await;
    resp.assert_status(StatusCode::MOVED_PERMANENTLY);
    resp.assert_header(header::LOCATION, "/docs/index.html");
}

#[tokio::test]
async fn nested_route() {
    let acceptor = TcpListener::bind("127.0.0.1:0")
        .into_acceptor()
        .await
        .unwrap();
    let addr = acceptor
        .local_addr()
        .remove(0)
        .as_socket_addr()
        .cloned()
        .unwrap();
    let app = Route::new().nest("/docs", SwaggerUi::new(Config::default()));
    tokio::spawn(async move {
        let _ = Server::new_with_acceptor(acceptor).run(app).await;
    });

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    for path in ["/docs", "/docs/"] {
        let resp = client
            .get(format!("http://{addr}{path}"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            resp.headers()
                .get(reqwest::header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/docs/index.html")
        );
    }

    let html = client
        .get(format!("http://{addr}/docs/index.html"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains(r#""url":"/docs/doc.json""#));
}

#[tokio::test]
async fn forwarded_prefix() {
    let cli = TestClient::new(SwaggerUi::new(Config::default()));

    let resp = cli
        .get("/")
        .header("X-Forwarded-Prefix", "/api//docs/")
        .send()
        .await;
    resp.assert_status(StatusCode::MOVED_PERMANENTLY);
    resp.assert_header(header::LOCATION, "/api/docs/index.html");

    let resp = cli.get("/index.html").send().await;
    let html = resp.0.into_body().into_string().await.unwrap();
    assert!(html.contains(r#""url":"/api/docs/doc.json""#));
}

#[tokio::test]
async fn without_forwarded_prefix() {
    let cli = TestClient::new(SwaggerUi::new(Config::default()));

    let resp = cli.get("/index.html").send().await;
    resp.assert_status_is_ok();
    let html = resp.0.into_body().into_string().await.unwrap();
    assert!(html.contains(r#""url":"/doc.json""#));

    cli.get("/")
        .send()
        .await
        .assert_header(header::LOCATION, "/index.html");
}

#[tokio::test]
async fn first_request_wins() {
    let cli = docs(SwaggerUi::new(Config::default())).await;

    let resp = cli
        .get("/")
        .header("X-Forwarded-Prefix", "/api")
        .send()
        .await;
    resp.assert_header(header::LOCATION, "/docs/index.html");

    let resp = cli.get("/index.html").send().await;
    let html = resp.0.into_body().into_string().await.unwrap();
    assert!(html.contains(r#""url":"/docs/doc.json""#));
}

#[tokio::test]
async fn not_found() {
    let cli = docs(SwaggerUi::new(Config::default())).await;

    cli.get("/swagger-ui.css")
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);
    cli.get("/index.html/x")
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn method_not_allowed() {
    let cli = docs(SwaggerUi::new(Config::default())).await;

    cli.post("/index.html")
        .send()
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn served_at_root() {
    let ui = SwaggerUi::new(Config::default());

    let resp = ui
        .call(Request::builder().uri(Uri::from_static("/")).finish())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        resp.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/index.html")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_requests() {
    let ui = SwaggerUi::new(Config::default());

    let tasks = (0..32)
        .map(|i| {
            let ui = ui.clone();
            tokio::spawn(async move {
                let req = Request::builder()
                    .method(Method::GET)
                    .uri(Uri::from_static("/"))
                    .header("X-Forwarded-Prefix", format!("/p{i}"))
                    .finish();
                let resp = ui.call(req).await.unwrap();
                resp.headers()
                    .get(header::LOCATION)
                    .and_then(|value| value.to_str().ok())
                    .map(ToString::to_string)
                    .unwrap()
            })
        })
        .collect::<Vec<_>>();

    let mut locations = Vec::new();
    for task in tasks {
        locations.push(task.await.unwrap());
    }

    assert!(locations[0].starts_with("/p"));
    assert!(locations.iter().all(|location| *location == locations[0]));
}

#[tokio::test]
async fn default_handler_is_shared() {
    let a = handler_default();
    let b = handler_default();
    assert_eq!(a.config(), b.config());

    a.call(
        Request::builder()
            .uri(Uri::from_static("/"))
            .header("X-Forwarded-Prefix", "/shared")
            .finish(),
    )
    .await
    .unwrap();

    let resp = b
        .call(Request::builder().uri(Uri::from_static("/")).finish())
        .await
        .unwrap();
    assert_eq!(
        resp.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/shared/index.html")
    );
}

#[test]
#[should_panic(expected = "failed to compile swagger index template")]
fn invalid_index_template() {
    SwaggerUi::new(Config::default().index_template("{% if %}"));
}
