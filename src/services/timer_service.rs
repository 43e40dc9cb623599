//! Timer Service
//!
//! Drives a [`TimerState`] in real time: a one-second ticker task while the
//! countdown runs, a one-shot deferred switch after a period completes, and
//! delivery of completed sessions to the [`SessionLog`].
//!
//! Commands and ticks all go through a single async mutex, so they are
//! applied one at a time in arrival order. Both background tasks are owned
//! handles stored next to the state: dropping a handle aborts its task, and
//! every task checks that the runtime still owns it before mutating anything.
//! Completed sessions are delivered outside the lock, once the switch that
//! follows them is already scheduled.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, Instrument};

use crate::logging::{
    log_session_completed, log_session_log_failure, log_timer_state_change, log_transition,
};
use crate::models::session::Session;
use crate::models::timer_snapshot::TimerSnapshot;
use crate::models::timer_state::{TickOutcome, TimerState, Transition, Trigger};
use crate::services::session_log::{SessionLog, SessionLogError};
use crate::services::time_provider::{SystemTimeProvider, TimeProvider};
use crate::timer_span;

/// Countdown granularity
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Pause between a period completing and the switch to the next one
pub const AUTO_SWITCH_DELAY: Duration = Duration::from_secs(1);

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// User commands accepted by the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TimerCommand {
    Start,
    Pause,
    /// Start when paused, pause when running
    Toggle,
    Reset,
    Switch,
}

/// Notifications for UI collaborators
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    Started { time_left: u32 },
    Paused { time_left: u32 },
    Reset { time_left: u32 },
    Tick { time_left: u32 },
    SessionCompleted { session: Session },
    SessionSwitched { transition: Transition },
}

/// Background task owned by the timer. Aborted when dropped.
#[derive(Debug)]
struct ScheduledTask {
    id: u64,
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    fn new(id: u64, handle: JoinHandle<()>) -> Self {
        Self {
            id,
            handle: Some(handle),
        }
    }

    /// Give up ownership without aborting; used by a task retiring itself
    fn release(mut self) {
        self.handle.take();
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[derive(Debug)]
struct TimerRuntime {
    state: TimerState,
    ticker: Option<ScheduledTask>,
    pending_switch: Option<ScheduledTask>,
    next_task_id: u64,
    disposed: bool,
}

impl TimerRuntime {
    fn new() -> Self {
        Self {
            state: TimerState::new(),
            ticker: None,
            pending_switch: None,
            next_task_id: 0,
            disposed: false,
        }
    }

    fn next_task_id(&mut self) -> u64 {
        self.next_task_id += 1;
        self.next_task_id
    }

    fn owns_ticker(&self, id: u64) -> bool {
        !self.disposed && self.ticker.as_ref().is_some_and(|task| task.id == id)
    }

    fn owns_pending_switch(&self, id: u64) -> bool {
        !self.disposed && self.pending_switch.as_ref().is_some_and(|task| task.id == id)
    }

    fn cancel_ticker(&mut self) {
        self.ticker = None;
    }

    fn cancel_pending_switch(&mut self) {
        self.pending_switch = None;
    }
}

struct Shared {
    runtime: Mutex<TimerRuntime>,
    log: Arc<dyn SessionLog>,
    clock: Arc<dyn TimeProvider>,
    events: broadcast::Sender<TimerEvent>,
}

impl Shared {
    fn emit(&self, event: TimerEvent) {
        // No subscribers is not an error
        let _ = self.events.send(event);
    }

    /// Hand a completed session to the log. Must be called without the
    /// runtime lock held. Errors and panics from the log are reported and
    /// swallowed so the countdown keeps going.
    fn report(&self, session: Session, focus_sessions_completed: u32) {
        let recorded = panic::catch_unwind(AssertUnwindSafe(|| self.log.record(&session)))
            .unwrap_or(Err(SessionLogError::Panicked));
        match recorded {
            Ok(()) => log_session_completed(&session, focus_sessions_completed),
            Err(e) => log_session_log_failure(&session, &e),
        }
        self.emit(TimerEvent::SessionCompleted { session });
    }

    fn spawn_ticker(self: &Arc<Self>, runtime: &mut TimerRuntime) {
        let id = runtime.next_task_id();
        let shared = Arc::downgrade(self);

        let handle = tokio::spawn(
            async move {
                let mut interval = time::interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

                loop {
                    interval.tick().await;
                    if !Self::on_tick(&shared, id).await {
                        break;
                    }
                }
                debug!("ticker stopped");
            }
            .instrument(tracing::debug_span!("ticker", task_id = id)),
        );

        runtime.ticker = Some(ScheduledTask::new(id, handle));
    }

    /// Apply one tick. Returns false once the ticker should stop.
    async fn on_tick(shared: &Weak<Self>, id: u64) -> bool {
        let Some(shared) = shared.upgrade() else {
            return false;
        };
        let mut runtime = shared.runtime.lock().await;
        if !runtime.owns_ticker(id) {
            return false;
        }

        let outcome = runtime.state.tick();
        match outcome {
            TickOutcome::Counting { time_left } => {
                shared.emit(TimerEvent::Tick { time_left });
                true
            }
            TickOutcome::Idle => {
                if let Some(task) = runtime.ticker.take() {
                    task.release();
                }
                false
            }
            TickOutcome::Completed(session) => {
                if let Some(task) = runtime.ticker.take() {
                    task.release();
                }
                shared.emit(TimerEvent::Tick { time_left: 0 });
                info!(session_type = %runtime.state.session_type, "Period finished");

                shared.schedule_switch(&mut runtime);

                if let Some(session) = session {
                    let completed = runtime.state.session_count + u32::from(session.is_focus());
                    drop(runtime);
                    shared.report(session, completed);
                }
                false
            }
        }
    }

    fn schedule_switch(self: &Arc<Self>, runtime: &mut TimerRuntime) {
        let id = runtime.next_task_id();
        let shared = Arc::downgrade(self);

        let handle = tokio::spawn(async move {
            time::sleep(AUTO_SWITCH_DELAY).await;
            if let Some(shared) = shared.upgrade() {
                shared.finish_pending_switch(id).await;
            }
        });

        runtime.pending_switch = Some(ScheduledTask::new(id, handle));
    }

    async fn finish_pending_switch(&self, id: u64) {
        let mut runtime = self.runtime.lock().await;
        if !runtime.owns_pending_switch(id) {
            return;
        }
        if let Some(task) = runtime.pending_switch.take() {
            task.release();
        }

        let transition = runtime.state.apply_transition(Trigger::Natural);
        log_transition(&transition);
        self.emit(TimerEvent::SessionSwitched { transition });
    }

    fn start(self: &Arc<Self>, runtime: &mut TimerRuntime) {
        let now = self.clock.now_utc();
        if runtime.state.start(now) {
            self.spawn_ticker(runtime);
            self.emit(TimerEvent::Started {
                time_left: runtime.state.time_left,
            });
        }
    }

    fn pause(&self, runtime: &mut TimerRuntime) {
        if runtime.state.pause() {
            runtime.cancel_ticker();
            self.emit(TimerEvent::Paused {
                time_left: runtime.state.time_left,
            });
        }
    }

    fn reset(&self, runtime: &mut TimerRuntime) {
        runtime.cancel_ticker();
        runtime.cancel_pending_switch();
        runtime.state.reset();
        self.emit(TimerEvent::Reset {
            time_left: runtime.state.time_left,
        });
    }

    fn switch_session(&self, runtime: &mut TimerRuntime) {
        runtime.cancel_ticker();
        runtime.cancel_pending_switch();
        let transition = runtime.state.apply_transition(Trigger::Manual);
        log_transition(&transition);
        self.emit(TimerEvent::SessionSwitched { transition });
    }
}

/// Focus/break session timer.
///
/// Cheap to clone; all clones drive the same countdown. Dropping the last
/// clone cancels any background work, as does [`SessionTimer::dispose`].
#[derive(Clone)]
pub struct SessionTimer {
    shared: Arc<Shared>,
}

impl SessionTimer {
    /// Create a timer reporting to `log`, stamped with system time
    pub fn new(log: Arc<dyn SessionLog>) -> Self {
        Self::with_clock(log, Arc::new(SystemTimeProvider::new()))
    }

    /// Create a timer with a custom wall-clock source
    pub fn with_clock(log: Arc<dyn SessionLog>, clock: Arc<dyn TimeProvider>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                runtime: Mutex::new(TimerRuntime::new()),
                log,
                clock,
                events,
            }),
        }
    }

    /// Apply a user command and return the resulting view.
    ///
    /// Redundant commands (pausing a paused timer, starting a running one)
    /// leave the state untouched. After [`SessionTimer::dispose`] every
    /// command is ignored.
    pub async fn apply(&self, command: TimerCommand) -> TimerSnapshot {
        let mut runtime = self.shared.runtime.lock().await;
        if runtime.disposed {
            debug!(%command, "Ignoring command on disposed timer");
            return TimerSnapshot::from(&runtime.state);
        }

        let span = timer_span!(command, runtime.state);
        span.in_scope(|| {
            match command {
                TimerCommand::Start => self.shared.start(&mut runtime),
                TimerCommand::Pause => self.shared.pause(&mut runtime),
                TimerCommand::Toggle if runtime.state.is_running => {
                    self.shared.pause(&mut runtime);
                }
                TimerCommand::Toggle => self.shared.start(&mut runtime),
                TimerCommand::Reset => self.shared.reset(&mut runtime),
                TimerCommand::Switch => self.shared.switch_session(&mut runtime),
            }
            log_timer_state_change(&command.to_string(), &runtime.state);
        });

        TimerSnapshot::from(&runtime.state)
    }

    pub async fn start(&self) -> TimerSnapshot {
        self.apply(TimerCommand::Start).await
    }

    pub async fn pause(&self) -> TimerSnapshot {
        self.apply(TimerCommand::Pause).await
    }

    pub async fn toggle(&self) -> TimerSnapshot {
        self.apply(TimerCommand::Toggle).await
    }

    pub async fn reset(&self) -> TimerSnapshot {
        self.apply(TimerCommand::Reset).await
    }

    /// Move to the next period immediately. Never reports a completion.
    pub async fn switch_session(&self) -> TimerSnapshot {
        self.apply(TimerCommand::Switch).await
    }

    /// Stop the countdown for good, cancelling the ticker and any pending
    /// switch. The last state stays readable.
    pub async fn dispose(&self) {
        let mut runtime = self.shared.runtime.lock().await;
        if runtime.disposed {
            return;
        }

        runtime.cancel_ticker();
        runtime.cancel_pending_switch();
        runtime.state.pause();
        runtime.disposed = true;
        info!(
            session_type = %runtime.state.session_type,
            time_left = runtime.state.time_left,
            "Timer disposed"
        );
    }

    /// Get current timer view
    pub async fn snapshot(&self) -> TimerSnapshot {
        let runtime = self.shared.runtime.lock().await;
        TimerSnapshot::from(&runtime.state)
    }

    /// Copy of the raw state
    pub async fn state(&self) -> TimerState {
        self.shared.runtime.lock().await.state.clone()
    }

    pub async fn is_running(&self) -> bool {
        self.shared.runtime.lock().await.state.is_running
    }

    pub async fn is_disposed(&self) -> bool {
        self.shared.runtime.lock().await.disposed
    }

    /// Whether an automatic switch is waiting to fire
    pub async fn has_pending_switch(&self) -> bool {
        self.shared.runtime.lock().await.pending_switch.is_some()
    }

    /// Receive timer events from now on
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.shared.events.subscribe()
    }
}
