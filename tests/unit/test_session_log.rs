use std::sync::Arc;
use std::thread;

use chrono::Utc;
use focus_timer::models::{Session, SessionType};
use focus_timer::services::{InMemorySessionLog, SessionLog};

#[test]
fn test_concurrent_records_are_all_kept() {
    let log = Arc::new(InMemorySessionLog::new());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let log = Arc::clone(&log);
            thread::spawn(move || {
                for _ in 0..25 {
                    let session_type = if i % 2 == 0 {
                        SessionType::Focus
                    } else {
                        SessionType::Break
                    };
                    log.record(&Session::new(session_type, 60, Utc::now()))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(log.len().unwrap(), 100);
    assert_eq!(log.focus_count().unwrap(), 50);
    assert_eq!(log.total_focus_seconds().unwrap(), 3000);
}

#[test]
fn test_usable_as_trait_object() {
    let concrete = Arc::new(InMemorySessionLog::with_capacity(3));
    let log: Arc<dyn SessionLog> = concrete.clone();

    for _ in 0..5 {
        log.record(&Session::new(SessionType::Focus, 1500, Utc::now()))
            .unwrap();
    }
    assert_eq!(concrete.len().unwrap(), 3);
}
