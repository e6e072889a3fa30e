use std::time::Duration;

use photobank_cli::{describe_error, is_exit_command, ChatClient, ClientError};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ChatClient {
    ChatClient::new(format!("{}/api/chat", server.uri()), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn ask_posts_the_question_and_returns_the_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({ "message": "Как загрузить фото?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "Через раздел Загрузка" })))
        .expect(1)
        .mount(&server)
        .await;

    let answer = client_for(&server).ask("Как загрузить фото?").await.unwrap();
    assert_eq!(answer, "Через раздел Загрузка");
}

#[tokio::test]
async fn server_errors_carry_error_and_details() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Произошла ошибка при обработке запроса",
            "details": "authorization failed"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).ask("вопрос").await.unwrap_err();
    match &err {
        ClientError::Api { status, error, details } => {
            assert_eq!(*status, 500);
            assert_eq!(error, "Произошла ошибка при обработке запроса");
            assert_eq!(details.as_deref(), Some("authorization failed"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        describe_error(&err),
        "Произошла ошибка при обработке запроса (authorization failed)"
    );
}

#[tokio::test]
async fn non_json_error_body_is_kept_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server).ask("вопрос").await.unwrap_err();
    assert_eq!(describe_error(&err), "Bad Gateway");
}

#[tokio::test]
async fn success_without_response_field_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "?" })))
        .mount(&server)
        .await;

    let err = client_for(&server).ask("вопрос").await.unwrap_err();
    assert!(matches!(err, ClientError::Malformed(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let client = ChatClient::new("http://127.0.0.1:9/api/chat", Duration::from_secs(2)).unwrap();
    let err = client.ask("вопрос").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

#[test]
fn exit_words_are_case_insensitive() {
    assert!(is_exit_command("выход"));
    assert!(is_exit_command("  ВЫХОД \n"));
    assert!(is_exit_command("Exit"));
    assert!(!is_exit_command("выходные дни"));
    assert!(!is_exit_command(""));
}
