//! Captures tracing events emitted while a test runs.

use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// A tracing layer that captures log lines to a Vec<String>
struct LogCapture {
	logs: Arc<Mutex<Vec<String>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
	fn on_event(
		&self,
		event: &tracing::Event<'_>,
		_ctx: tracing_subscriber::layer::Context<'_, S>,
	) {
		struct LineVisitor {
			line: String,
		}

		impl tracing::field::Visit for LineVisitor {
			fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
				if field.name() == "message" {
					self.line.insert_str(0, &format!("{:?}", value));
				} else {
					self.line.push_str(&format!(" {}={:?}", field.name(), value));
				}
			}
		}

		let mut visitor = LineVisitor {
			line: String::new(),
		};
		event.record(&mut visitor);

		self.logs
			.lock()
			.unwrap()
			.push(format!("[{}] {}", event.metadata().level(), visitor.line));
	}
}

/// Runs `f` with a thread-local subscriber and returns the captured lines.
pub fn capture_logs(f: impl FnOnce()) -> Vec<String> {
	let logs = Arc::new(Mutex::new(Vec::new()));
	let capture = LogCapture { logs: logs.clone() };

	{
		let _guard = tracing_subscriber::registry().with(capture).set_default();
		f();
	}

	let captured = logs.lock().unwrap().clone();
	captured
}
