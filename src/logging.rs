//! Diagnostic logging capability injected into a [`Client`](crate::Client).
//!
//! The client reports call lifecycle events through a [`Logger`]. Nothing the
//! logger does affects control flow. Without an explicit logger the client
//! uses [`TracingLogger`].

/// Sink for client diagnostics.
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use vertex_genai::Logger;
///
/// #[derive(Default)]
/// struct Collect(Mutex<Vec<String>>);
///
/// impl Logger for Collect {
///     fn debug(&self, message: &str) {
///         self.0.lock().unwrap().push(message.to_string());
///     }
///     fn info(&self, message: &str) {
///         self.debug(message);
///     }
///     fn error(&self, message: &str) {
///         self.debug(message);
///     }
/// }
///
/// let logger: Arc<dyn Logger> = Arc::new(Collect::default());
/// logger.info("ready");
/// ```
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards to the `tracing` macros under the `vertex_genai` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "vertex_genai", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "vertex_genai", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "vertex_genai", "{message}");
    }
}
