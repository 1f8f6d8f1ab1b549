use mockito::Matcher;
use reqwest::multipart::Form;

use super::*;

fn client_for(base_url: &str, token: Option<&str>) -> ApiClient {
    let tokens = TokenStore::with_token(token.map(ToOwned::to_owned));
    ApiClient::new(&ClientConfig::with_base_url(base_url), tokens).unwrap()
}

fn book_json(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "title": title,
        "genre": "Fiction",
        "description": "d",
        "author": { "_id": "u1", "name": "Ada" },
        "coverImage": "https://cdn.example.test/c.png",
        "file": "https://cdn.example.test/f.pdf",
        "createdAt": "2024-03-05T10:00:00Z"
    })
}

#[test]
fn new_rejects_non_http_base_url() {
    let err = ApiClient::new(&ClientConfig::with_base_url("ftp://books"), TokenStore::new()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidUrl(_)));
    let err = ApiClient::new(&ClientConfig::with_base_url("localhost"), TokenStore::new()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidUrl(_)));
}

#[test]
fn url_appends_encoded_segments_to_base() {
    let client = client_for("http://localhost:5513", None);
    assert_eq!(client.base_url(), "http://localhost:5513");
    assert_eq!(client.url(&BOOKS_PATH).as_str(), "http://localhost:5513/api/books");
    assert_eq!(
        client.url(&book_path("a b/c")).as_str(),
        "http://localhost:5513/api/books/a%20b%2Fc"
    );

    let prefixed = client_for("https://example.test/admin/", None);
    assert_eq!(prefixed.url(&LOGIN_PATH).as_str(), "https://example.test/admin/api/users/login");
}

#[test]
fn request_without_token_omits_authorization() {
    let client = client_for("http://localhost:5513", None);
    let request = client.request(Method::GET, &BOOKS_PATH).unwrap().build().unwrap();
    assert!(request.headers().get(AUTHORIZATION).is_none());
}

#[test]
fn request_with_token_sends_it_verbatim() {
    let client = client_for("http://localhost:5513", Some("eyJ.hdr.sig"));
    let request = client.request(Method::DELETE, &book_path("b1")).unwrap().build().unwrap();
    assert_eq!(request.headers().get(AUTHORIZATION).unwrap(), "Bearer eyJ.hdr.sig");
}

#[test]
fn request_reads_token_at_call_time() {
    let client = client_for("http://localhost:5513", None);
    client.tokens().set("late");
    let request = client.request(Method::GET, &BOOKS_PATH).unwrap().build().unwrap();
    assert_eq!(request.headers().get(AUTHORIZATION).unwrap(), "Bearer late");

    client.tokens().clear();
    let request = client.request(Method::GET, &BOOKS_PATH).unwrap().build().unwrap();
    assert!(request.headers().get(AUTHORIZATION).is_none());
}

#[test]
fn request_rejects_token_with_newline() {
    let client = client_for("http://localhost:5513", Some("bad\ntoken"));
    let err = client.request(Method::GET, &BOOKS_PATH).unwrap_err();
    assert!(matches!(err, ApiError::InvalidHeader(_)));
}

#[tokio::test]
async fn login_posts_json_credentials_and_returns_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/users/login")
        .match_header("content-type", "application/json")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(serde_json::json!({
            "email": "demo@example.test",
            "password": "secret"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"accessToken":"tok-1"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server.url(), None);
    let token = client
        .login(&LoginRequest { email: "demo@example.test".to_owned(), password: "secret".to_owned() })
        .await
        .unwrap();

    assert_eq!(token.access_token, "tok-1");
    mock.assert_async().await;
}

#[tokio::test]
async fn register_posts_all_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/users/register")
        .match_body(Matcher::Json(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.test",
            "password": "pw123456"
        })))
        .with_status(201)
        .with_body(r#"{"accessToken":"tok-new"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url(), None);
    let token = client
        .register(&RegisterRequest {
            name: "Ada".to_owned(),
            email: "ada@example.test".to_owned(),
            password: "pw123456".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(token.access_token, "tok-new");
    mock.assert_async().await;
}

#[tokio::test]
async fn get_books_sends_bearer_and_decodes_list() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/books")
        .match_header("authorization", "Bearer tok-1")
        .with_status(200)
        .with_body(serde_json::json!([book_json("b1", "Dune"), book_json("b2", "Emma")]).to_string())
        .create_async()
        .await;

    let client = client_for(&server.url(), Some("tok-1"));
    let books = client.get_books().await.unwrap();

    assert_eq!(books.len(), 2);
    assert_eq!(books[1].title, "Emma");
    mock.assert_async().await;
}

#[tokio::test]
async fn get_book_hits_detail_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/books/b1")
        .with_status(200)
        .with_body(book_json("b1", "Dune").to_string())
        .create_async()
        .await;

    let client = client_for(&server.url(), None);
    let book = client.get_book("b1").await.unwrap();

    assert_eq!(book.id, "b1");
    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_becomes_status_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/api/books/b1")
        .with_status(403)
        .with_body(r#"{"message":"You can not delete others book."}"#)
        .create_async()
        .await;

    let client = client_for(&server.url(), Some("tok-1"));
    let err = client.delete_book("b1").await.unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert!(err.is_unauthorized());
    match err {
        ApiError::Status { body, .. } => assert!(body.contains("others book")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn malformed_list_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/books")
        .with_status(200)
        .with_body(r#"{"not":"a list"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url(), None);
    let err = client.get_books().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn create_book_sends_one_multipart_post() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/books")
        .match_header("content-type", Matcher::Regex("^multipart/form-data; boundary=".to_owned()))
        .match_header("authorization", "Bearer tok-1")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="title""#.to_owned()),
            Matcher::Regex("Dune".to_owned()),
        ]))
        .with_status(201)
        .with_body(r#"{"id":"b9"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server.url(), Some("tok-1"));
    let response = client
        .create_book(Form::new().text("title", "Dune"))
        .await
        .unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.value()["id"], "b9");
    mock.assert_async().await;
}

#[tokio::test]
async fn download_fetches_absolute_url_without_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/files/dune.pdf")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("%PDF-1.4")
        .create_async()
        .await;

    let client = client_for("http://localhost:5513", Some("tok-1"));
    let bytes = client
        .download(&format!("{}/files/dune.pdf", server.url()))
        .await
        .unwrap();

    assert_eq!(bytes, b"%PDF-1.4");
    mock.assert_async().await;
}

#[test]
fn api_response_value_tolerates_empty_body() {
    let response = ApiResponse { status: 204, body: Vec::new() };
    assert_eq!(response.value(), serde_json::Value::Null);
}
