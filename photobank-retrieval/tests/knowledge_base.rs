use std::fs;
use std::sync::Arc;

use photobank_core::Distance;
use photobank_retrieval::{HashEmbedder, KnowledgeBase, LoadError, TextSplitter};
use tempfile::tempdir;

fn small_knowledge_base() -> KnowledgeBase {
    KnowledgeBase::new(
        Arc::new(HashEmbedder::default()),
        TextSplitter::new(40, 10).unwrap(),
        Distance::Cosine,
    )
}

#[tokio::test]
async fn knowledge_base_starts_empty() {
    let knowledge = KnowledgeBase::default();

    assert!(knowledge.is_empty().await);
    assert!(knowledge.search("вопрос", 3).await.unwrap().is_empty());
}

#[tokio::test]
async fn load_indexes_every_chunk_of_the_document() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("help.txt");
    let text = "Чтобы загрузить фотографии, перейдите в раздел Загрузка. \
                Оплата производится банковской картой.";
    fs::write(&path, text).expect("write temp file");

    let knowledge = small_knowledge_base();
    let count = knowledge.load(&path).await.expect("load");

    let expected = knowledge.splitter().split_text(text).len();
    assert_eq!(count, expected);
    assert_eq!(knowledge.len().await, expected);

    let hits = knowledge.search("загрузить фотографии", 1).await.unwrap();
    assert!(hits[0].chunk.content.contains("загрузить"));
}

#[tokio::test]
async fn failed_load_keeps_previous_index() {
    let knowledge = small_knowledge_base();
    knowledge
        .load_text("inline", "Служба поддержки работает круглосуточно")
        .await
        .unwrap();
    let before = knowledge.snapshot().await;

    let error = knowledge
        .load("/definitely/not/here/help.docx")
        .await
        .expect_err("missing file");
    assert!(matches!(error, LoadError::Read { .. }));

    let after = knowledge.snapshot().await;
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(after.chunks()[0].content, "Служба поддержки работает круглосуточно");
}

#[tokio::test]
async fn reload_replaces_the_whole_index() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("help.md");
    fs::write(&path, "первая версия базы знаний").expect("write v1");

    let knowledge = small_knowledge_base();
    knowledge.load(&path).await.unwrap();
    let first = knowledge.snapshot().await;

    fs::write(&path, "вторая версия").expect("write v2");
    knowledge.load(&path).await.unwrap();
    let second = knowledge.snapshot().await;

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(second.len(), 1);
    assert_eq!(second.chunks()[0].content, "вторая версия");
    assert_eq!(first.chunks()[0].content, "первая версия базы знаний");
}

#[tokio::test]
async fn loading_the_same_file_twice_is_idempotent() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("help.txt");
    fs::write(&path, "a".repeat(100)).expect("write");

    let knowledge = small_knowledge_base();
    let first = knowledge.load(&path).await.unwrap();
    let second = knowledge.load(&path).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(knowledge.len().await, first);
}
