//! Per-operation-class request spacing.
//!
//! A crude admission-control measure: rapid UI interaction must not
//! turn into a request storm. `acquire` spaces calls instead of
//! dropping them, so no user edit is silently discarded.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

/// Logical operation classes with independent spacing windows.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OpClass {
    Fetch,
    FieldSave,
    Add,
    Edit,
    Delete,
}

pub struct RateLimiter {
    policy: HashMap<OpClass, Duration>,
    last: Mutex<HashMap<OpClass, Instant>>,
}

impl RateLimiter {
    pub fn new(policy: HashMap<OpClass, Duration>) -> Self {
        Self {
            policy,
            last: Mutex::new(HashMap::new()),
        }
    }

    /// Field saves are spaced at 500 ms; everything else at 1000 ms.
    pub fn with_defaults() -> Self {
        let mut policy = HashMap::new();
        policy.insert(OpClass::Fetch, Duration::from_millis(1000));
        policy.insert(OpClass::FieldSave, Duration::from_millis(500));
        policy.insert(OpClass::Add, Duration::from_millis(1000));
        policy.insert(OpClass::Edit, Duration::from_millis(1000));
        policy.insert(OpClass::Delete, Duration::from_millis(1000));
        Self::new(policy)
    }

    /// Await until the class's window opens, then claim it.
    pub async fn acquire(&self, class: OpClass) {
        let interval = self.policy.get(&class).copied().unwrap_or(Duration::ZERO);

        loop {
            let wait = {
                let mut last = self.last.lock().unwrap();
                let now = Instant::now();
                match last.get(&class) {
                    Some(previous) if now - *previous < interval => interval - (now - *previous),
                    _ => {
                        last.insert(class, now);
                        return;
                    }
                }
            };
            tokio::time::sleep(wait).await;
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::with_defaults()
    }
}
