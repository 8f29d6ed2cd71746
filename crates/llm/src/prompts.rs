//! Prompt templates for chat and document classification

use crate::types::ChatMessage;

/// Instruction used when a classification request does not supply one
pub const DEFAULT_CLASSIFY_INSTRUCTION: &str = r#"Classify the following document. Return a short category label and a one-sentence explanation. Respond in JSON format: { "category": "...", "explanation": "..." }"#;

/// Render a transcript as `Role: content` lines
pub fn render_transcript(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| match m.role.label() {
            Some(label) => format!("{}: {}", label, m.content),
            None => m.content.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt block for document classification
pub fn classification_prompt(
    instruction: &str,
    filename: &str,
    mime_type: &str,
    content: &str,
) -> String {
    let filename_line = format!("Filename: {}", filename);
    let mime_line = format!("MIME type: {}", mime_type);

    [
        instruction,
        "",
        filename_line.as_str(),
        mime_line.as_str(),
        "",
        "--- DOCUMENT CONTENT ---",
        content,
        "--- END OF DOCUMENT ---",
    ]
    .join("\n")
}
