//! Core services invoked by the CLI adapter.

pub mod clipboard;
pub mod respond;
pub mod settings;
pub mod token;
pub mod workitem;
