use std::future::Future;
use std::time::{Duration, Instant};

use nowip_domain::Result;
use tracing::{info, warn};

/// Log the outcome of a command execution with structured fields.
///
/// `command` should be a stable identifier such as `"domains::detail"`.
/// Callers must avoid forwarding tokens or other sensitive values in it.
#[inline]
pub fn log_command_execution(
    command: &str,
    elapsed: Duration,
    error_type: Option<&'static str>,
) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match error_type {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(error_type) => warn!(command, duration_ms, error_type, "command_execution_failure"),
    }
}

/// Run a command future, timing and logging its outcome.
pub async fn execute_logged<Fut, T>(command: &str, command_fut: Fut) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
{
    let start = Instant::now();
    let result = command_fut.await;
    log_command_execution(command, start.elapsed(), result.as_ref().err().map(|e| e.label()));
    result
}

/// Synchronous counterpart of [`execute_logged`].
pub fn run_logged<T>(command: &str, command_fn: impl FnOnce() -> Result<T>) -> Result<T> {
    let start = Instant::now();
    let result = command_fn();
    log_command_execution(command, start.elapsed(), result.as_ref().err().map(|e| e.label()));
    result
}

#[cfg(test)]
pub(crate) mod capture {
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, Layer};

    /// Collects the `command` field and message of every event.
    #[derive(Clone, Default)]
    pub(crate) struct CommandLog(Arc<Mutex<Vec<(String, String)>>>);

    impl CommandLog {
        pub(crate) fn entries(&self) -> Vec<(String, String)> {
            self.0.lock().unwrap().clone()
        }
    }

    #[derive(Default)]
    struct Fields {
        command: Option<String>,
        message: String,
    }

    impl Visit for Fields {
        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "command" {
                self.command = Some(value.to_string());
            }
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                self.message = format!("{value:?}");
            }
        }
    }

    impl<S: Subscriber> Layer<S> for CommandLog {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = Fields::default();
            event.record(&mut fields);
            if let Some(command) = fields.command {
                self.0.lock().unwrap().push((command, fields.message));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use nowip_domain::NowipError;
    use tracing_subscriber::layer::SubscriberExt;

    use super::capture::CommandLog;
    use super::*;

    #[test]
    fn run_logged_reports_success_and_failure() {
        let log = CommandLog::default();
        let subscriber = tracing_subscriber::registry().with(log.clone());

        tracing::subscriber::with_default(subscriber, || {
            run_logged("demo::ok", || Ok(1)).unwrap();
            run_logged::<()>("demo::fail", || Err(NowipError::NotFound("x".into()))).unwrap_err();
        });

        assert_eq!(
            log.entries(),
            [
                ("demo::ok".to_string(), "command_execution_success".to_string()),
                ("demo::fail".to_string(), "command_execution_failure".to_string()),
            ]
        );
    }
}
