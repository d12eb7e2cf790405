use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

/// `Logger` adapter that forwards to `tracing`, tagging every event with
/// the component that emitted it.
pub struct TracingLogger {
    component: &'static str,
}

impl TracingLogger {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "arxiv_researcher", component = self.component, "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "arxiv_researcher", component = self.component, "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "arxiv_researcher", component = self.component, "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "arxiv_researcher", component = self.component, "{}", message);
    }
}
