//! Logging configuration for Focus Timer
//!
//! Structured logging setup with appropriate levels and formatting.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::Config;
use crate::models::session::Session;
use crate::models::timer_state::{TimerState, Transition};
use crate::services::session_log::SessionLogError;

/// Initialize the application logging system.
///
/// `RUST_LOG` wins over the configured level. Production gets JSON lines,
/// everything else a compact console format. Calling this twice is harmless.
pub fn init_logging(config: &Config) {
    let default_filter = format!(
        "focus_timer={level},tower_http={level},axum::rejection=trace",
        level = config.log_level
    );

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let layer = if config.is_production() {
        json_layer().boxed()
    } else {
        console_layer().boxed()
    };

    if Registry::default()
        .with(layer.with_filter(env_filter))
        .try_init()
        .is_ok()
    {
        tracing::info!("Logging system initialized");
    }
}

/// JSON logging layer for production
fn json_layer() -> impl Layer<Registry> + Send + Sync {
    fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
}

/// Console logging layer for development
fn console_layer() -> impl Layer<Registry> + Send + Sync {
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_ansi(true)
}

/// Create a span for timer operations
#[macro_export]
macro_rules! timer_span {
    ($operation:expr, $state:expr) => {{
        let state = &$state;
        tracing::info_span!(
            "timer_operation",
            operation = %$operation,
            session_type = %state.session_type,
            session_count = state.session_count,
        )
    }};
}

/// Log application startup
pub fn log_startup() {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        git_commit = option_env!("GIT_COMMIT").unwrap_or("unknown"),
        "Focus Timer starting up"
    );
}

/// Log timer state change after a command
pub fn log_timer_state_change(operation: &str, state: &TimerState) {
    tracing::info!(
        operation = %operation,
        session_type = %state.session_type,
        is_running = state.is_running,
        time_left = state.time_left,
        elapsed = state.period_duration.saturating_sub(state.time_left),
        "Timer state changed"
    );
}

/// Log a transition between focus and break
pub fn log_transition(transition: &Transition) {
    tracing::info!(
        from = %transition.from,
        to = %transition.to,
        trigger = %transition.trigger,
        long_break = transition.long_break,
        session_count = transition.session_count,
        "Session switched"
    );
}

/// Log timer session completion
pub fn log_session_completed(session: &Session, focus_sessions_completed: u32) {
    tracing::info!(
        session_id = %session.id,
        session_type = %session.session_type,
        duration = session.duration,
        started_at = %session.timestamp,
        focus_sessions_completed = focus_sessions_completed,
        "Timer session completed"
    );
}

/// Log a session log that refused a completed session
pub fn log_session_log_failure(session: &Session, error: &SessionLogError) {
    tracing::warn!(
        session_id = %session.id,
        error = %error,
        "Session log rejected completed session"
    );
}

/// Log error with context
pub fn log_error(error: &str, context: &str) {
    tracing::error!(error = %error, context = %context, "Application error occurred");
}
