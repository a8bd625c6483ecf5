// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-based chat replies for when no remote model is available.

use mindcheck_core::types::{ChatMessage, ChatReply};

/// Reply offered when the user mentions stress or anxiety.
pub const BREATHING_REPLY: &str = "It sounds like you are carrying a lot of tension right now. \
Let's try a short breathing exercise together: breathe in slowly for 4 seconds, hold for 4, \
and breathe out for 6. Repeat it a few times and tell me how you feel afterwards.";

/// Reply offered when the user mentions sadness or hopelessness.
pub const EMPATHY_REPLY: &str = "I'm sorry you are feeling this way. Your feelings matter. \
Would you like to tell me a bit more about what has been weighing on you lately?";

/// Reply offered for anything else.
pub const LISTENING_REPLY: &str = "Thank you for sharing that with me. I'm here to listen. \
How have you been feeling over the last few days?";

/// Rules checked in order; the first rule with a matching keyword wins.
const RULES: [(&[&str], &str); 2] = [
    (&["stress", "anxiety"], BREATHING_REPLY),
    (&["sad", "hopeless"], EMPATHY_REPLY),
];

/// Picks a reply based on keywords in the last message only.
///
/// Matching is case-insensitive substring search. An empty conversation
/// gets the listening reply.
pub fn respond(messages: &[ChatMessage]) -> ChatReply {
    let content = messages
        .last()
        .map(|m| m.content.to_lowercase())
        .unwrap_or_default();

    let reply = RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| content.contains(k)))
        .map_or(LISTENING_REPLY, |(_, reply)| *reply);

    ChatReply {
        reply: reply.to_string(),
    }
}
