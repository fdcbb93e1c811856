use std::{
    collections::HashMap,
    sync::Mutex,
    time::Instant,
};

use poise::serenity_prelude::UserId;

use crate::access::is_admin;
use crate::config::COOLDOWN_WINDOW;

/// Tracks the last permitted invocation per user. Admins bypass the tracker
/// entirely and leave no entry behind.
///
/// Entries are never evicted; one entry per distinct caller is an accepted
/// cost at this deployment's size.
pub struct CooldownTracker {
    // std mutex: the critical section is a single map access and is never
    // held across an await point
    last_used: Mutex<HashMap<UserId, Instant>>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self {
            last_used: Mutex::new(HashMap::new()),
        }
    }

    /// Returns whether the invocation is admitted, recording `now` for the
    /// user if it is. A denied invocation leaves the stored instant unchanged,
    /// so spamming does not extend the window.
    pub fn allow(&self, user: UserId, now: Instant) -> bool {
        if is_admin(user) {
            return true;
        }

        let mut last_used = self
            .last_used
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(&last) = last_used.get(&user) {
            if now.saturating_duration_since(last) < COOLDOWN_WINDOW {
                return false;
            }
        }

        last_used.insert(user, now);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread, time::Duration};

    use super::*;
    use crate::config::ADMINS;

    const USER: UserId = UserId::new(99);

    #[test]
    fn first_invocation_is_admitted() {
        let tracker = CooldownTracker::new();
        assert!(tracker.allow(USER, Instant::now()));
    }

    #[test]
    fn window_boundary() {
        let tracker = CooldownTracker::new();
        let t0 = Instant::now();

        assert!(tracker.allow(USER, t0));
        assert!(!tracker.allow(USER, t0 + Duration::from_secs_f64(1.0)));
        assert!(tracker.allow(USER, t0 + Duration::from_secs_f64(2.1)));
    }

    #[test]
    fn denied_invocation_does_not_extend_window() {
        let tracker = CooldownTracker::new();
        let t0 = Instant::now();

        assert!(tracker.allow(USER, t0));
        // denied at t0 + 1.9s; the window still ends relative to t0
        assert!(!tracker.allow(USER, t0 + Duration::from_secs_f64(1.9)));
        assert!(tracker.allow(USER, t0 + Duration::from_secs_f64(2.0)));
    }

    #[test]
    fn users_are_tracked_independently() {
        let tracker = CooldownTracker::new();
        let t0 = Instant::now();

        assert!(tracker.allow(UserId::new(1), t0));
        assert!(tracker.allow(UserId::new(2), t0));
    }

    #[test]
    fn admins_are_exempt() {
        let tracker = CooldownTracker::new();
        let t0 = Instant::now();

        for _ in 0..5 {
            assert!(tracker.allow(ADMINS[0], t0));
        }
    }

    #[test]
    fn simultaneous_invocations_admit_exactly_one() {
        let tracker = Arc::new(CooldownTracker::new());
        let now = Instant::now();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                thread::spawn(move || tracker.allow(USER, now))
            })
            .collect();

        let admitted = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|&admitted| admitted)
            .count();

        assert_eq!(admitted, 1);
    }
}
