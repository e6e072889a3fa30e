use photobank_core::Message;
use photobank_retrieval::SearchResult;

pub const PERSONA: &str =
    "Ты - AI ассистент для фото-банка. Используй следующую информацию для ответов: ";

/// Newline-joined chunk text, most relevant first.
pub fn join_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|hit| hit.chunk.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// System message with the persona and context, then the raw question.
pub fn compose_messages(context: &str, question: &str) -> Vec<Message> {
    vec![
        Message::system(format!("{PERSONA}{context}")),
        Message::user(question),
    ]
}
