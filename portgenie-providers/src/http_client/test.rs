use std::sync::Arc;

use wiremock::{
    matchers::{body_string_contains, header_regex, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use crate::http_client::{imp::reqwest_client::ReqwestClient, FormPart, HttpClient, StatusCode};

#[tokio::test]
async fn test_query_is_appended() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rows"))
        .and(query_param("select", "*"))
        .and(query_param("user_id", "eq.user 1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Arc::new(ReqwestClient::default());
    let response = client
        .get(&format!("{}/rows?select=*", mock_server.uri()))
        .query([("user_id", "eq.user 1")])
        .unwrap()
        .send()
        .await
        .unwrap();

    assert!(response.status.is_success());
    assert_eq!(response.json::<Vec<String>>().unwrap(), Vec::<String>::new());
}

#[tokio::test]
async fn test_multipart_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header_regex("Content-Type", "^multipart/form-data; boundary="))
        .and(body_string_contains("name=\"note\"\r\n\r\nhello\r\n"))
        .and(body_string_contains(
            "filename=\"a.txt\"\r\nContent-Type: text/plain\r\n\r\nbody\r\n",
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Arc::new(ReqwestClient::default());
    let response = client
        .post(&mock_server.uri())
        .multipart(vec![
            FormPart::text("note", "hello"),
            FormPart::file("file", "a.txt", "text/plain", b"body".to_vec()),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode(200));
}

#[tokio::test]
async fn test_multipart_file_name_cannot_break_part_headers() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Arc::new(ReqwestClient::default());
    client
        .post(&mock_server.uri())
        .multipart(vec![FormPart::file(
            "file",
            "my \"cv\".pdf\r\nX-Injected: 1",
            "application/pdf",
            b"body".to_vec(),
        )])
        .send()
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(!body.contains("\r\nX-Injected"));
    assert!(!body.contains("filename=\"my \"cv\""));
    assert!(body.contains("\r\n\r\nbody\r\n"));
}

#[tokio::test]
async fn test_error_for_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = Arc::new(ReqwestClient::default());
    let response = client.head(&mock_server.uri()).send().await.unwrap();

    assert!(response.error_for_status().is_err());
}
