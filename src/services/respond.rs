//! Response generator — prompt templating over the chat seam.
//!
//! DESIGN
//! ======
//! Deterministic string templating: one fixed system instruction carrying
//! the rejection-letter rules, one user message built from the work item
//! and optional support-engineer notes. The only I/O is a single chat
//! call through [`LlmChat`], so tests drive this with a mock.

use std::fmt::Write as _;

use crate::llm::{LlmChat, LlmError, Message};
use crate::services::workitem::WorkItem;

/// The rejection-letter writing rules sent as the system message.
pub const SYSTEM_PROMPT: &str = r#"You are a professional technical writer for Microsoft. Your task is to write customer-friendly rejection responses for Design Change Requests (DCRs).

IMPORTANT FORMAT REQUIREMENTS:
- Start the response with "Customer Friendly Rejection" on its own line, followed by a blank line
- Do NOT include any salutation like "Dear [Customer]" or "Dear [Name]"
- Do NOT include any sign-off like "Warm regards", "Best regards", signature blocks, or names at the end
- Jump straight into the content after the header

The response content should follow this structure:
1. Opening: Thank the customer for submitting the DCR and acknowledge the specific request and business context they provided.
2. Rejection: Clearly but kindly state that we cannot proceed with this change at this time. Provide a technical or business reason (e.g., significant cross-platform changes required, current roadmap priorities focused on reliability/performance/cross-platform consistency, etc.).
3. Workaround: ONLY include a workaround section if a specific workaround is explicitly mentioned in the work item description or additional context. Do NOT invent or suggest workarounds on your own. If no workaround is provided, skip this section entirely.
4. Future consideration: Mention the request has been added to the backlog for future consideration and will be evaluated in upcoming planning cycles. Note that while you cannot provide a timeline, the request will be kept active.
5. Closing: Express understanding of the impact and appreciation for the customer's partnership. Invite them to reach out if they have additional questions.

Keep the tone professional, empathetic, and constructive. Do not use excessive corporate jargon. Be concise but thorough."#;

/// Draft a rejection response for the work item.
///
/// # Errors
///
/// Propagates any [`LlmError`] from the chat call.
pub async fn generate(
    work_item: &WorkItem,
    extra_notes: &str,
    llm: &dyn LlmChat,
) -> Result<String, LlmError> {
    let messages = build_messages(work_item, extra_notes);
    tracing::info!(id = work_item.id, notes = !extra_notes.trim().is_empty(), "generating response");
    llm.chat(&messages).await
}

/// The fixed system instruction plus the templated user message.
#[must_use]
pub fn build_messages(work_item: &WorkItem, extra_notes: &str) -> Vec<Message> {
    vec![
        Message::system(SYSTEM_PROMPT),
        Message::user(build_user_prompt(work_item, extra_notes)),
    ]
}

pub(crate) fn build_user_prompt(work_item: &WorkItem, extra_notes: &str) -> String {
    let mut prompt = format!(
        "Please write a rejection response for the following Design Change Request:\n\n\
         Title: {}\n\n\
         Description/Details:\n{}",
        work_item.title,
        work_item.description_text()
    );

    let notes = extra_notes.trim();
    if !notes.is_empty() {
        let _ = write!(prompt, "\n\nAdditional Context from Support Engineer:\n{notes}");
    }

    prompt.push_str(
        "\n\nGenerate a complete, ready-to-send response following the structure provided. Make sure to:\n\
         - Start with \"Customer Friendly Rejection\" header followed by a blank line\n\
         - Do NOT include any \"Dear...\" salutation or \"Warm regards\" sign-off\n\
         - Reference the specific feature/change they requested\n\
         - Acknowledge their business context if mentioned\n\
         - ONLY mention a workaround if one is explicitly stated in the description or additional context above - do NOT make up workarounds\n\
         - Keep the response professional but warm",
    );
    prompt
}

#[cfg(test)]
#[path = "respond_test.rs"]
mod tests;
