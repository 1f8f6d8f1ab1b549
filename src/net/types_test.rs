use super::types::*;

pub(crate) fn sample_book(id: &str) -> Book {
    Book {
        id: id.to_owned(),
        title: format!("Book {id}"),
        genre: "Fiction".to_owned(),
        description: "A story.".to_owned(),
        author: AuthorRef::Populated(Author { id: Some("u1".to_owned()), name: "Ada".to_owned() }),
        cover_image: format!("https://cdn.example.test/{id}.png"),
        file: format!("https://cdn.example.test/{id}.pdf"),
        created_at: "2024-03-05T10:00:00Z".parse().unwrap(),
        updated_at: None,
    }
}

#[test]
fn book_deserializes_server_json_with_populated_author() {
    let json = serde_json::json!({
        "_id": "665f",
        "title": "Dune",
        "genre": "Sci-Fi",
        "description": "Spice.",
        "author": { "_id": "u1", "name": "Frank Herbert" },
        "coverImage": "https://cdn.example.test/dune.png",
        "file": "https://cdn.example.test/dune.pdf",
        "createdAt": "2024-06-04T12:30:00.000Z",
        "updatedAt": "2024-06-05T08:00:00.000Z",
        "__v": 0
    });
    let book: Book = serde_json::from_value(json).unwrap();
    assert_eq!(book.id, "665f");
    assert_eq!(book.author.display_name(), "Frank Herbert");
    assert_eq!(book.cover_image, "https://cdn.example.test/dune.png");
    assert_eq!(book.created_at.to_rfc3339(), "2024-06-04T12:30:00+00:00");
    assert!(book.updated_at.is_some());
}

#[test]
fn book_accepts_bare_author_id_and_missing_description() {
    let json = serde_json::json!({
        "_id": "b2",
        "title": "Untitled",
        "genre": "Misc",
        "author": "u42",
        "coverImage": "c",
        "file": "f",
        "createdAt": "2024-01-01T00:00:00Z"
    });
    let book: Book = serde_json::from_value(json).unwrap();
    assert_eq!(book.author, AuthorRef::Id("u42".to_owned()));
    assert_eq!(book.author.display_name(), "u42");
    assert_eq!(book.description, "");
    assert_eq!(book.updated_at, None);
}

#[test]
fn auth_token_reads_camel_case_access_token() {
    let token: AuthToken = serde_json::from_str(r#"{"accessToken":"jwt.abc"}"#).unwrap();
    assert_eq!(token.access_token, "jwt.abc");
}

#[test]
fn register_request_serializes_plain_fields() {
    let body = RegisterRequest {
        name: "Ada".to_owned(),
        email: "ada@example.test".to_owned(),
        password: "pw".to_owned(),
    };
    assert_eq!(
        serde_json::to_value(body).unwrap(),
        serde_json::json!({ "name": "Ada", "email": "ada@example.test", "password": "pw" })
    );
}
