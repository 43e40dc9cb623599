use chrono::{DateTime, TimeZone, Utc};
use focus_timer::models::timer_state::{
    TickOutcome, TimerPhase, TimerState, Trigger, FOCUS_DURATION, LONG_BREAK_DURATION,
    MAX_DURATION, SHORT_BREAK_DURATION,
};
use focus_timer::models::SessionType;

fn started_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 8, 30, 0).single().unwrap()
}

/// Tick `n` times, collecting completion outcomes
fn tick_n(state: &mut TimerState, n: u32) -> Vec<TickOutcome> {
    (0..n)
        .map(|_| state.tick())
        .filter(|outcome| matches!(outcome, TickOutcome::Completed(_)))
        .collect()
}

/// Drive one focus period to completion and apply the natural transition
fn complete_focus(state: &mut TimerState) {
    assert_eq!(state.session_type, SessionType::Focus);
    state.start(started_at());
    let completions = tick_n(state, FOCUS_DURATION);
    assert_eq!(completions.len(), 1);
    state.apply_transition(Trigger::Natural);
}

#[test]
fn test_start_then_pause_keeps_time_left() {
    let mut state = TimerState::new();
    state.start(started_at());
    state.pause();
    assert_eq!(state.time_left, FOCUS_DURATION);
    assert_eq!(state.start_time, Some(started_at()));
}

#[test]
fn test_full_focus_period_completes_once() {
    let mut state = TimerState::new();
    state.start(started_at());

    let completions = tick_n(&mut state, FOCUS_DURATION);
    assert_eq!(state.time_left, 0);
    assert_eq!(completions.len(), 1);

    let TickOutcome::Completed(Some(session)) = &completions[0] else {
        panic!("completion without a session: {:?}", completions[0]);
    };
    assert_eq!(session.session_type, SessionType::Focus);
    assert_eq!(session.duration, 1500);
    assert_eq!(session.timestamp, started_at());
}

#[test]
fn test_pause_resume_completes_on_cumulative_tick() {
    let mut state = TimerState::new();
    state.start(started_at());
    assert!(tick_n(&mut state, 10).is_empty());

    state.pause();
    assert!(tick_n(&mut state, 50).is_empty());
    assert_eq!(state.time_left, FOCUS_DURATION - 10);

    state.start(started_at() + chrono::Duration::minutes(3));
    assert!(tick_n(&mut state, FOCUS_DURATION - 10 - 1).is_empty());

    let last = state.tick();
    let TickOutcome::Completed(Some(session)) = last else {
        panic!("expected completion on tick 1500, got {last:?}");
    };
    // Nominal duration and the first start, regardless of the pause
    assert_eq!(session.duration, FOCUS_DURATION);
    assert_eq!(session.timestamp, started_at());
}

#[test]
fn test_break_lengths_follow_cadence() {
    let mut state = TimerState::new();
    let mut breaks = Vec::new();

    for _ in 0..8 {
        complete_focus(&mut state);
        breaks.push(state.time_left);
        state.apply_transition(Trigger::Natural);
    }

    assert_eq!(
        breaks,
        vec![
            SHORT_BREAK_DURATION,
            SHORT_BREAK_DURATION,
            SHORT_BREAK_DURATION,
            LONG_BREAK_DURATION,
            SHORT_BREAK_DURATION,
            SHORT_BREAK_DURATION,
            SHORT_BREAK_DURATION,
            LONG_BREAK_DURATION,
        ]
    );
}

#[test]
fn test_manual_and_natural_share_cadence() {
    let mut natural = TimerState::new();
    let mut manual = TimerState::new();

    for _ in 0..4 {
        natural.apply_transition(Trigger::Natural);
        manual.apply_transition(Trigger::Manual);
        assert_eq!(natural, manual);
        natural.apply_transition(Trigger::Natural);
        manual.apply_transition(Trigger::Manual);
    }
    assert_eq!(natural.session_count, 4);
}

#[test]
fn test_long_break_completion_reports_long_duration() {
    let mut state = TimerState {
        session_count: 3,
        ..TimerState::new()
    };
    state.apply_transition(Trigger::Natural);
    state.start(started_at());

    let completions = tick_n(&mut state, LONG_BREAK_DURATION);
    let TickOutcome::Completed(Some(session)) = &completions[0] else {
        panic!("expected a break completion");
    };
    assert_eq!(session.session_type, SessionType::Break);
    assert_eq!(session.duration, LONG_BREAK_DURATION);
}

#[test]
fn test_reset_during_long_break() {
    let mut state = TimerState {
        session_count: 3,
        ..TimerState::new()
    };
    state.apply_transition(Trigger::Manual);
    assert_eq!(state.time_left, LONG_BREAK_DURATION);

    state.start(started_at());
    tick_n(&mut state, 100);
    state.reset();

    assert_eq!(state.time_left, SHORT_BREAK_DURATION);
    assert!(!state.is_running);
    assert!(state.start_time.is_none());
}

#[test]
fn test_reset_after_completion_reactivates_period() {
    let mut state = TimerState::new();
    state.start(started_at());
    tick_n(&mut state, FOCUS_DURATION);
    assert_eq!(state.phase, TimerPhase::Completed);

    state.reset();
    assert_eq!(state.phase, TimerPhase::Active);
    assert_eq!(state.time_left, FOCUS_DURATION);
    assert!(state.start(started_at()));
}

#[test]
fn test_time_left_stays_within_bounds() {
    let mut state = TimerState::new();

    // Deterministic mix of commands and ticks
    for step in 0u32..20_000 {
        match step % 997 {
            0 => {
                state.apply_transition(Trigger::Manual);
            }
            500 => state.reset(),
            n if n % 211 == 0 => {
                state.pause();
            }
            _ => {
                state.start(started_at());
                if let TickOutcome::Completed(_) = state.tick() {
                    state.apply_transition(Trigger::Natural);
                }
            }
        }
        assert!(state.time_left <= MAX_DURATION);
        assert!(state.within_bounds());
    }
}
