//! Request building tests against the mock transport

mod common;

use bytes::Bytes;
use common::{echo_body, response_with_header};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use turbohttp::{Http, MockReply, MockTransport, Proxy, TransportError};

#[tokio::test]
async fn test_get() {
    let http = Http::mock([response_with_header(200, "X-Foo", "Bar", "OK!")]);

    let response = http.get("https://example.com").await.unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.body_as_string(), "OK!");
    assert_eq!(response.header_line("X-Foo"), "Bar");
}

#[tokio::test]
async fn test_delete() {
    let mock = MockTransport::new([turbohttp::transport::mock::response(200, "")]);
    let http = Http::with_transport(mock.clone());

    let response = http.delete("https://example.com").await.unwrap();

    assert_eq!(response.status_code(), 200);
    let sent = mock.requests().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, http::Method::DELETE);
    assert!(sent[0].body.is_none());
}

#[tokio::test]
async fn test_post_json() {
    let http = Http::mock([echo_body()]);

    let response = http
        .post_json("https://example.com", &json!({"foo": "bar"}))
        .await
        .unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.body_as_string(), r#"{"foo":"bar"}"#);
    // The content type is added automatically
    assert_eq!(response.header_line("X-Encoding"), "application/json");
    assert_eq!(response.data().unwrap(), json!({"foo": "bar"}));
}

#[tokio::test]
async fn test_put_json() {
    let http = Http::mock([echo_body()]);

    let response = http
        .put_json("https://example.com", &json!({"foo": "bar"}))
        .await
        .unwrap();

    assert_eq!(response.body_as_string(), r#"{"foo":"bar"}"#);
    assert_eq!(response.header_line("X-Encoding"), "application/json");
    assert_eq!(response.data().unwrap(), json!({"foo": "bar"}));
}

#[tokio::test]
async fn test_patch_json() {
    let mock = MockTransport::new([echo_body()]);
    let http = Http::with_transport(mock.clone());

    let response = http
        .patch_json("https://example.com", &json!({"foo": "bar"}))
        .await
        .unwrap();

    assert_eq!(response.body_as_string(), r#"{"foo":"bar"}"#);
    assert_eq!(response.header_line("X-Encoding"), "application/json");
    assert_eq!(mock.requests().await[0].method, http::Method::PATCH);
}

#[tokio::test]
async fn test_json_from_struct() {
    #[derive(serde::Serialize)]
    struct NewItem {
        name: &'static str,
        tags: Vec<&'static str>,
    }

    let http = Http::mock([echo_body()]);
    let response = http
        .post_json(
            "https://example.com/items",
            &NewItem {
                name: "widget",
                tags: vec!["a"],
            },
        )
        .await
        .unwrap();

    assert_eq!(
        response.body_as_string(),
        r#"{"name":"widget","tags":["a"]}"#
    );
}

#[tokio::test]
async fn test_post_form_data() {
    let http = Http::mock([echo_body()]);

    let response = http
        .post_form(
            "https://example.com",
            &json!({"foo": "bar", "baz": ["hi", "there!"]}),
        )
        .await
        .unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.body_as_string(),
        "foo=bar&baz%5B0%5D=hi&baz%5B1%5D=there%21"
    );
    assert_eq!(
        response.header_line("X-Encoding"),
        "application/x-www-form-urlencoded"
    );
}

#[tokio::test]
async fn test_put_form_data() {
    let http = Http::mock([echo_body()]);

    let response = http
        .put_form(
            "https://example.com",
            &json!({"foo": "bar", "baz": ["hi", "there!"]}),
        )
        .await
        .unwrap();

    assert_eq!(
        response.body_as_string(),
        "foo=bar&baz%5B0%5D=hi&baz%5B1%5D=there%21"
    );
    assert_eq!(
        response.header_line("X-Encoding"),
        "application/x-www-form-urlencoded"
    );
}

#[tokio::test]
async fn test_form_rejects_scalar_without_sending() {
    let mock = MockTransport::new([echo_body()]);
    let http = Http::with_transport(mock.clone());

    let err = http
        .post_form("https://example.com", "not a mapping")
        .await
        .unwrap_err();

    assert!(matches!(err, turbohttp::Error::Encode(_)));
    assert!(mock.requests().await.is_empty());
}

#[tokio::test]
async fn test_explicit_content_type_wins() {
    let http =
        Http::mock([echo_body()]).with_header("Content-Type", "application/merge-patch+json");

    let response = http
        .patch_json("https://example.com", &json!({"a": null}))
        .await
        .unwrap();

    assert_eq!(
        response.header_line("X-Encoding"),
        "application/merge-patch+json"
    );
}

#[tokio::test]
async fn test_with_header() {
    let http1 = Http::mock([MockReply::handler(|request, _options| {
        let values: Vec<_> = request
            .headers()
            .get_all("X-Foo")
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(values, vec!["Bar", "Baz"]);
        http::Response::new(Bytes::new())
    })]);

    let http2 = http1.with_header("X-Foo", ["Bar", "Baz"]);

    // A copy is created and the original keeps its configuration
    assert!(http1.config().header("X-Foo").is_none());
    assert_eq!(http2.get("https://example.com").await.unwrap().status_code(), 200);
}

#[tokio::test]
async fn test_with_header_overwrites() {
    let mock = MockTransport::new([echo_body()]);
    let http = Http::with_transport(mock.clone())
        .with_header("Authorization", "Bearer old")
        .with_header("authorization", "Bearer new");

    http.get("https://example.com").await.unwrap();

    let sent = mock.requests().await;
    assert_eq!(sent[0].header_values("Authorization"), vec!["Bearer new"]);
}

#[tokio::test]
async fn test_with_timeout() {
    let http1 = Http::mock([MockReply::handler(|_request, options| {
        assert_eq!(options.timeout, Duration::from_secs(1));
        assert_eq!(options.connect_timeout, Duration::from_secs(2));
        http::Response::new(Bytes::new())
    })]);

    let http2 = http1.with_timeout(Duration::from_secs(1), Duration::from_secs(2));

    assert_eq!(http1.config().request_timeout, Duration::from_secs(5));
    assert_eq!(http1.config().connect_timeout, Duration::from_secs(3));
    http2.get("https://example.com").await.unwrap();
}

#[tokio::test]
async fn test_default_timeouts_are_sent() {
    let mock = MockTransport::new([turbohttp::transport::mock::response(200, "")]);
    Http::with_transport(mock.clone())
        .get("https://example.com")
        .await
        .unwrap();

    let sent = mock.requests().await;
    let options = &sent[0].options;
    assert_eq!(options.timeout, Duration::from_secs(5));
    assert_eq!(options.connect_timeout, Duration::from_secs(3));
    assert!(options.proxy.is_none());
    assert!(options.query.is_none());
}

#[tokio::test]
async fn test_with_query_params_as_map() {
    let http1 = Http::mock([MockReply::handler(|request, _options| {
        assert_eq!(request.uri().query(), Some("foo=bar"));
        http::Response::new(Bytes::new())
    })]);

    let http2 = http1.with_query_params(json!({"foo": "bar"}));

    assert!(http1.config().query_params.is_none());
    http2.get("https://example.com").await.unwrap();
}

#[tokio::test]
async fn test_with_query_params_as_string() {
    let http1 = Http::mock([MockReply::handler(|request, _options| {
        assert_eq!(request.uri().query(), Some("foo=bar"));
        http::Response::new(Bytes::new())
    })]);

    let http2 = http1.with_query_params("foo=bar");

    assert!(http1.config().query_params.is_none());
    http2.get("https://example.com").await.unwrap();
}

#[tokio::test]
async fn test_query_params_replace_url_query() {
    let http = Http::mock([MockReply::handler(|request, _options| {
        assert_eq!(request.uri().query(), Some("page=2&tags%5B0%5D=a"));
        http::Response::new(Bytes::new())
    })])
    .with_query_params(json!({"page": 2, "tags": ["a"]}));

    http.get("https://example.com/items?page=1").await.unwrap();
}

#[tokio::test]
async fn test_with_single_proxy() {
    let http1 = Http::mock([MockReply::handler(|_request, options| {
        assert_eq!(
            options.proxy,
            Some(Proxy::Single("tcp://localhost:8125".into()))
        );
        http::Response::new(Bytes::new())
    })]);

    let http2 = http1.with_single_proxy("tcp://localhost:8125");

    assert!(http1.config().proxy.is_none());
    http2.get("https://example.com").await.unwrap();
}

#[tokio::test]
async fn test_with_multiple_proxies() {
    let http1 = Http::mock([MockReply::handler(|_request, options| {
        assert_eq!(
            options.proxy,
            Some(Proxy::PerScheme {
                http: "tcp://localhost:8125".into(),
                https: "tcp://localhost:9124".into(),
                no: vec![".mit.edu".into(), "foo.com".into()],
            })
        );
        http::Response::new(Bytes::new())
    })]);

    let http2 = http1.with_multiple_proxies(
        "tcp://localhost:8125",
        "tcp://localhost:9124",
        [".mit.edu", "foo.com"],
    );

    assert!(http1.config().proxy.is_none());
    http2.get("https://example.com").await.unwrap();
}

#[tokio::test]
async fn test_transport_error_is_propagated() {
    let mock = MockTransport::new([MockReply::Error(TransportError::Timeout)]);
    let http = Http::with_transport(mock.clone());

    let err = http.get("https://example.com").await.unwrap_err();

    assert!(err.is_timeout());
    assert!(err.is_transport());
    // Not retried
    assert_eq!(mock.requests().await.len(), 1);
}

#[tokio::test]
async fn test_error_status_is_not_an_error() {
    let http = Http::mock([turbohttp::transport::mock::response(500, "boom")]);

    let response = http.get("https://example.com").await.unwrap();

    assert_eq!(response.status_code(), 500);
    assert!(!response.is_success());
    assert_eq!(response.reason_phrase(), "Internal Server Error");
}

#[tokio::test]
async fn test_invalid_header_is_transport_error() {
    let http = Http::mock([echo_body()]).with_header("Bad Header", "x");

    let err = http.get("https://example.com").await.unwrap_err();

    assert!(matches!(
        err,
        turbohttp::Error::Transport(TransportError::InvalidRequest(_))
    ));
}

#[tokio::test]
async fn test_exhausted_mock() {
    let http = Http::mock(Vec::<MockReply>::new());

    let err = http.get("https://example.com").await.unwrap_err();

    assert!(matches!(
        err,
        turbohttp::Error::Transport(TransportError::Exhausted { .. })
    ));
}

#[tokio::test]
async fn test_shared_builder_across_tasks() {
    let mock = MockTransport::new([
        turbohttp::transport::mock::response(200, "a"),
        turbohttp::transport::mock::response(200, "b"),
    ]);
    let http = Http::with_transport(mock.clone()).with_header("X-Client", "shared");

    let first = tokio::spawn({
        let http = http.clone();
        async move { http.get("https://example.com/1").await }
    });
    let second = tokio::spawn({
        let http = http.with_header("X-Client", "second");
        async move { http.get("https://example.com/2").await }
    });

    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    let mut clients: Vec<_> = mock
        .requests()
        .await
        .iter()
        .map(|r| r.header_values("X-Client")[0].to_string())
        .collect();
    clients.sort();
    assert_eq!(clients, vec!["second", "shared"]);
}
