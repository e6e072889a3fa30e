use std::sync::Arc;

use photobank_core::{Distance, Role};
use photobank_llm::{AuthError, GigaChatConfig, UpstreamError};
use photobank_rag::{AssistantError, SupportAssistant, PERSONA};
use photobank_retrieval::{HashEmbedder, KnowledgeBase, LoadError, TextSplitter};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UPLOAD_CHUNK: &str = "Чтобы загрузить фотографии, перейдите в раздел Загрузка";
const QUESTION: &str = "Как загрузить фотографии на сайт?";

fn config_for(server: &MockServer) -> GigaChatConfig {
    GigaChatConfig {
        auth_url: format!("{}/api/v2/oauth", server.uri()),
        api_url: format!("{}/api/v1", server.uri()),
        ..GigaChatConfig::default()
    }
}

fn assistant_for(server: &MockServer) -> SupportAssistant {
    SupportAssistant::builder()
        .credential(SecretString::new("test-key".to_string()))
        .config(config_for(server))
        .build()
        .expect("assistant")
}

async fn mount_auth(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/v2/oauth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "bearer-1",
            "expires_at": 1800
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_chat(server: &MockServer, answer: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(header("Authorization", "Bearer bearer-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": answer}}]
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn answer_returns_the_generated_text() {
    let server = MockServer::start().await;
    mount_auth(&server, 1).await;
    mount_chat(&server, "OK", 1).await;

    let assistant = assistant_for(&server);
    assert_eq!(assistant.answer(QUESTION).await.unwrap(), "OK");
}

#[tokio::test]
async fn system_prompt_embeds_the_matching_chunk_verbatim() {
    let server = MockServer::start().await;
    mount_auth(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(body_string_contains(UPLOAD_CHUNK))
        .and(body_string_contains(QUESTION))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "Откройте раздел Загрузка"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let assistant = assistant_for(&server);
    assistant
        .knowledge()
        .load_text("help.docx", UPLOAD_CHUNK)
        .await
        .unwrap();

    let messages = assistant.build_messages(QUESTION).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::System);
    assert!(messages[0].content.starts_with(PERSONA));
    assert!(messages[0].content.contains(UPLOAD_CHUNK));
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[1].content, QUESTION);

    assert_eq!(
        assistant.answer(QUESTION).await.unwrap(),
        "Откройте раздел Загрузка"
    );
}

#[tokio::test]
async fn context_is_limited_to_three_chunks() {
    let knowledge = KnowledgeBase::new(
        Arc::new(HashEmbedder::default()),
        TextSplitter::new(10, 0).unwrap(),
        Distance::Cosine,
    );
    knowledge
        .load_text("inline", &"abcdefghij".repeat(5))
        .await
        .unwrap();

    let server = MockServer::start().await;
    let assistant = SupportAssistant::builder()
        .credential(SecretString::new("test-key".to_string()))
        .config(config_for(&server))
        .knowledge_base(knowledge)
        .build()
        .unwrap();

    let messages = assistant.build_messages("вопрос").await.unwrap();
    let context = messages[0].content.trim_start_matches(PERSONA);
    assert_eq!(context.split('\n').count(), 3);
}

#[tokio::test]
async fn empty_knowledge_base_yields_empty_context() {
    let server = MockServer::start().await;
    let assistant = assistant_for(&server);

    let messages = assistant.build_messages(QUESTION).await.unwrap();
    assert_eq!(messages[0].content, PERSONA);
}

#[tokio::test]
async fn empty_message_is_rejected_before_any_upstream_call() {
    let server = MockServer::start().await;
    mount_auth(&server, 0).await;
    mount_chat(&server, "unused", 0).await;

    let assistant = assistant_for(&server);
    let err = assistant.answer("   ").await.unwrap_err();

    assert!(matches!(err, AssistantError::EmptyMessage));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn auth_failure_stops_before_the_completion_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/oauth"))
        .respond_with(ResponseTemplate::new(500).set_body_string("auth down"))
        .expect(1)
        .mount(&server)
        .await;
    mount_chat(&server, "unused", 0).await;

    let assistant = assistant_for(&server);
    let err = assistant.answer(QUESTION).await.unwrap_err();

    assert!(matches!(
        err,
        AssistantError::Auth(AuthError::Status { status: 500, .. })
    ));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn missing_choices_surface_as_upstream_error() {
    let server = MockServer::start().await;
    mount_auth(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let assistant = assistant_for(&server);
    let err = assistant.answer(QUESTION).await.unwrap_err();

    assert!(matches!(
        err,
        AssistantError::Upstream(UpstreamError::EmptyChoices)
    ));
}

#[tokio::test]
async fn rejected_bearer_token_is_not_reused() {
    let server = MockServer::start().await;
    mount_auth(&server, 2).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": 401,
            "message": "Token has expired"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let assistant = assistant_for(&server);
    for _ in 0..2 {
        let err = assistant.answer(QUESTION).await.unwrap_err();
        assert!(matches!(
            err,
            AssistantError::Upstream(UpstreamError::Status { status: 401, .. })
        ));
    }
}

#[tokio::test]
async fn token_is_shared_across_answers() {
    let server = MockServer::start().await;
    mount_auth(&server, 1).await;
    mount_chat(&server, "OK", 2).await;

    let assistant = assistant_for(&server);
    assistant.answer("первый вопрос").await.unwrap();
    assistant.answer("второй вопрос").await.unwrap();
}

#[tokio::test]
async fn reload_uses_the_configured_path_and_keeps_old_index_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("help.txt");
    std::fs::write(&good, UPLOAD_CHUNK).unwrap();

    let server = MockServer::start().await;
    let assistant = SupportAssistant::builder()
        .credential(SecretString::new("test-key".to_string()))
        .config(config_for(&server))
        .knowledge_path(&good)
        .build()
        .unwrap();

    assert_eq!(assistant.knowledge_path(), Some(good.as_path()));
    assert_eq!(assistant.reload().await.unwrap(), 1);

    let err = assistant
        .load_knowledge_base(dir.path().join("missing.docx"))
        .await
        .unwrap_err();
    assert!(matches!(err, AssistantError::Load(LoadError::Read { .. })));
    assert_eq!(assistant.knowledge().len().await, 1);
}

#[tokio::test]
async fn reload_without_a_path_is_an_error() {
    let server = MockServer::start().await;
    let assistant = assistant_for(&server);

    assert!(matches!(
        assistant.reload().await,
        Err(AssistantError::NoKnowledgePath)
    ));
}

#[test]
fn builder_requires_a_credential() {
    let err = SupportAssistant::builder().build().unwrap_err();
    assert!(matches!(err, AssistantError::Auth(AuthError::MissingCredential)));
}
