//! Integration tests for pagevet.
//!
//! These tests require Chrome/Chromium to be installed and are marked
//! #[ignore] by default. Run with: cargo test --package pagevet -- --ignored

use pagevet::{run, CheckConfig, Engine, WaitUntil};

fn config_for(urls: Vec<String>) -> CheckConfig {
    CheckConfig::new(urls, Engine::Chromium, false, 30.0, WaitUntil::Load).expect("valid config")
}

fn data_url(html: &str) -> String {
    format!("data:text/html,{}", urlencoding::encode(html))
}

fn clean_page() -> String {
    data_url(
        r#"
        <!DOCTYPE html>
        <html>
        <head><title>Clean</title></head>
        <body>
            <h1>All quiet</h1>
            <script>console.log("loaded");</script>
        </body>
        </html>
        "#,
    )
}

fn console_error_page() -> String {
    data_url(
        r#"
        <!DOCTYPE html>
        <html>
        <head><title>Broken</title></head>
        <body>
            <script>console.error("something went wrong");</script>
        </body>
        </html>
        "#,
    )
}

fn exception_page() -> String {
    data_url(
        r#"
        <!DOCTYPE html>
        <html>
        <head><title>Throws</title></head>
        <body>
            <script>throw new Error("kaboom");</script>
        </body>
        </html>
        "#,
    )
}

#[tokio::test]
async fn empty_url_list_reports_zero() {
    let count = run(&config_for(Vec::new())).await.expect("run succeeds");
    assert_eq!(count, 0);
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn clean_page_reports_zero() {
    let count = run(&config_for(vec![clean_page()]))
        .await
        .expect("run succeeds");
    assert_eq!(count, 0, "a clean page must contribute no errors");
}

#[tokio::test]
#[ignore]
async fn console_error_counts_one() {
    let count = run(&config_for(vec![console_error_page()]))
        .await
        .expect("run succeeds");
    assert_eq!(count, 1, "exactly one console error expected");
}

#[tokio::test]
#[ignore]
async fn uncaught_exception_counts_one() {
    let count = run(&config_for(vec![exception_page()]))
        .await
        .expect("run succeeds");
    assert_eq!(count, 1, "exactly one uncaught exception expected");
}

#[tokio::test]
#[ignore]
async fn counts_are_additive_across_urls() {
    let urls = vec![console_error_page(), clean_page(), exception_page()];
    let count = run(&config_for(urls)).await.expect("run succeeds");
    assert_eq!(count, 2, "one error page plus one throwing page");
}

#[tokio::test]
#[ignore]
async fn not_found_status_is_counted() {
    async fn missing() -> (axum::http::StatusCode, &'static str) {
        (axum::http::StatusCode::NOT_FOUND, "missing")
    }

    let app = axum::Router::new().route("/missing", axum::routing::get(missing));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    let url = format!("http://{addr}/missing");
    let count = run(&config_for(vec![url])).await.expect("run succeeds");
    assert!(count >= 1, "a 404 document must be counted");
}

#[tokio::test]
#[ignore]
async fn timeout_is_counted_and_the_run_continues() {
    // A listener that accepts connections but never responds.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind hang server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let _socket = socket;
                tokio::time::sleep(std::time::Duration::from_secs(600)).await;
            });
        }
    });

    let urls = vec![format!("http://{addr}/"), clean_page()];
    let config = CheckConfig::new(urls, Engine::Chromium, false, 2.0, WaitUntil::Load)
        .expect("valid config");

    let count = run(&config).await.expect("run succeeds");
    assert_eq!(count, 1, "the hung URL times out; the clean one is fine");
}
