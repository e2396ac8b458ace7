//! Audit sink boundary.
//!
//! Every mutating management operation emits structured events here. Emission
//! is fire-and-forget: the sink is infallible from the caller's point of view
//! and must never block or fail the primary operation.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Severity of an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditLevel {
    Info,
    Warning,
    Error,
}

/// Structured record of an administrative action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub level: AuditLevel,
    pub message: String,
    pub fields: serde_json::Value,
}

impl AuditEvent {
    pub fn info(message: impl Into<String>, fields: serde_json::Value) -> Self {
        Self {
            level: AuditLevel::Info,
            message: message.into(),
            fields,
        }
    }

    pub fn warning(message: impl Into<String>, fields: serde_json::Value) -> Self {
        Self {
            level: AuditLevel::Warning,
            message: message.into(),
            fields,
        }
    }

    pub fn error(message: impl Into<String>, fields: serde_json::Value) -> Self {
        Self {
            level: AuditLevel::Error,
            message: message.into(),
            fields,
        }
    }
}

/// Receives audit events from the management service.
pub trait AuditSink: Send + Sync {
    fn emit(&self, event: AuditEvent);
}

impl<S> AuditSink for Arc<S>
where
    S: AuditSink + ?Sized,
{
    fn emit(&self, event: AuditEvent) {
        (**self).emit(event)
    }
}

/// Forwards audit events to the process-wide `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn emit(&self, event: AuditEvent) {
        match event.level {
            AuditLevel::Info => {
                tracing::info!(target: "audit", fields = %event.fields, "{}", event.message)
            }
            AuditLevel::Warning => {
                tracing::warn!(target: "audit", fields = %event.fields, "{}", event.message)
            }
            AuditLevel::Error => {
                tracing::error!(target: "audit", fields = %event.fields, "{}", event.message)
            }
        }
    }
}

/// Captures audit events in memory for assertions in tests.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    inner: Mutex<Vec<AuditEvent>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AuditEvent> {
        self.inner.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut v) = self.inner.lock() {
            v.clear();
        }
    }
}

impl AuditSink for MemoryAuditSink {
    fn emit(&self, event: AuditEvent) {
        if let Ok(mut v) = self.inner.lock() {
            v.push(event);
        }
    }
}
