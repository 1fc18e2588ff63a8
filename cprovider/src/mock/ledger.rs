//! Append-only record of streaming invocations, kept for test assertions.

use crate::{Message, ModelRequest, ToolDefinition};

/// Arguments of one `stream` call, captured when the call was made.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRecord {
    pub messages: Vec<Message>,
    pub system: String,
    pub tools: Option<Vec<ToolDefinition>>,
}

impl From<&ModelRequest> for InvocationRecord {
    fn from(request: &ModelRequest) -> Self {
        Self {
            messages: request.messages.clone(),
            system: request.system.clone(),
            tools: request.tools.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CallLedger {
    records: Vec<InvocationRecord>,
}

impl CallLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and returns its position.
    pub fn record(&mut self, invocation: InvocationRecord) -> usize {
        self.records.push(invocation);
        self.records.len() - 1
    }

    pub fn all(&self) -> &[InvocationRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&InvocationRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
