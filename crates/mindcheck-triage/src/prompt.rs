// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt construction for the remote inference path.

use mindcheck_core::types::{AnsweredItem, ChatMessage};
use mindcheck_core::MindcheckError;

/// System instruction for assessment requests.
pub const ASSESSMENT_SYSTEM_INSTRUCTION: &str =
    "You respond only with a single valid JSON object. Do not add any text before or after it.";

/// System instruction prepended to every chat conversation.
pub const CHAT_SYSTEM_INSTRUCTION: &str = "You are a warm, empathetic support assistant for \
emotional well-being. You never diagnose and never present yourself as a clinician. Listen, \
validate feelings, and suggest simple coping strategies. If the user mentions self-harm, \
suicidal thoughts, or other signs of high risk, gently but clearly encourage them to contact \
a mental health professional or local emergency services right away. Always answer in English.";

/// Output contract the model must follow for assessments.
pub const ASSESSMENT_SCHEMA: &str = r#"{
  "summary": "string",
  "risks": {
    "stress": "low | moderate | high",
    "anxiety": "low | moderate | high",
    "depression": "low | moderate | high"
  },
  "recommendations": "string"
}"#;

/// Builds the single user-role prompt for an assessment.
///
/// The answers are embedded verbatim as JSON data.
pub fn assessment_prompt(answers: &[AnsweredItem]) -> Result<String, MindcheckError> {
    let data = serde_json::to_string(answers)
        .map_err(|e| MindcheckError::Internal(format!("failed to serialize answers: {e}")))?;

    Ok(format!(
        "You are a cautious triage assistant for emotional well-being. You do not diagnose; \
you only estimate coarse risk levels from a 21-item self-report questionnaire where each \
answer is scored from 0 (never) to 3 (almost always).\n\n\
Return a JSON object with exactly this structure:\n{ASSESSMENT_SCHEMA}\n\n\
Use only the values low, moderate, or high for each risk. Keep the summary short and \
non-alarming, and make the recommendations practical. Recommend professional help when any \
risk is high.\n\n\
Answers (question number is the 1-based position, or `id` when present):\n{data}"
    ))
}

/// Messages for an assessment request: JSON-only system instruction, then the prompt.
pub fn assessment_messages(answers: &[AnsweredItem]) -> Result<Vec<ChatMessage>, MindcheckError> {
    Ok(vec![
        ChatMessage::system(ASSESSMENT_SYSTEM_INSTRUCTION),
        ChatMessage::user(assessment_prompt(answers)?),
    ])
}

/// Messages for a chat request: the fixed system instruction, then the caller's
/// conversation unchanged.
pub fn chat_messages(conversation: &[ChatMessage]) -> Vec<ChatMessage> {
    std::iter::once(ChatMessage::system(CHAT_SYSTEM_INSTRUCTION))
        .chain(conversation.iter().cloned())
        .collect()
}
