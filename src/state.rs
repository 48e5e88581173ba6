//! Session context — the single current work item and response.
//!
//! DESIGN
//! ======
//! One explicit session-scoped context instead of ambient globals: the
//! adapter threads it through each operation, and tests construct
//! independent sessions per case. Slots are replaced wholesale on
//! success only; a failed fetch or generation leaves the previous value
//! in place. There is no history or undo.

use crate::llm::LlmError;
use crate::services::settings::Settings;
use crate::services::workitem::{WorkItem, WorkItemError};

#[derive(Debug, Default)]
pub struct Session {
    pub settings: Settings,
    work_item: Option<WorkItem>,
    response: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self { settings, work_item: None, response: None }
    }

    #[must_use]
    pub fn work_item(&self) -> Option<&WorkItem> {
        self.work_item.as_ref()
    }

    #[must_use]
    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    /// Record a fetch outcome: success replaces the current item
    /// wholesale, failure leaves it unchanged.
    ///
    /// # Errors
    ///
    /// Passes the fetch error through untouched.
    pub fn record_fetch(
        &mut self,
        outcome: Result<WorkItem, WorkItemError>,
    ) -> Result<&WorkItem, WorkItemError> {
        let item = outcome?;
        Ok(&*self.work_item.insert(item))
    }

    /// Record a generation outcome: success replaces the current
    /// response, failure leaves it unchanged.
    ///
    /// # Errors
    ///
    /// Passes the chat error through untouched.
    pub fn record_response(
        &mut self,
        outcome: Result<String, LlmError>,
    ) -> Result<&str, LlmError> {
        let text = outcome?;
        Ok(self.response.insert(text).as_str())
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
