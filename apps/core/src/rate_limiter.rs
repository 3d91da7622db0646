use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Per-user sliding-window rate limiter for chat messages.
///
/// Shared across request handlers, so the window state lives behind a mutex.
pub struct RateLimiter {
    windows: Mutex<Windows>,
    /// The maximum number of requests allowed within the `window`.
    limit: usize,
    window: Duration,
}

struct Windows {
    /// Timestamps of accepted requests per user id.
    by_user: HashMap<String, Vec<Instant>>,
    last_sweep: Instant,
}

impl RateLimiter {
    /// `limit` requests per `window` for each user.
    pub fn new(limit: usize, window: Duration) -> Self {
        RateLimiter {
            windows: Mutex::new(Windows {
                by_user: HashMap::new(),
                last_sweep: Instant::now(),
            }),
            limit,
            window,
        }
    }

    /// `limit` requests per minute for each user.
    pub fn per_minute(limit: usize) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }

    /// Records a request for `user_id` and returns `true` if it is within the limit.
    ///
    /// Rejected requests are not recorded. Users idle for a whole window are
    /// dropped from the map at most once per window.
    pub fn check(&self, user_id: &str) -> bool {
        let now = Instant::now();
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if now.duration_since(windows.last_sweep) >= self.window {
            let window = self.window;
            windows
                .by_user
                .retain(|_, stamps| stamps.last().is_some_and(|t| now.duration_since(*t) < window));
            windows.last_sweep = now;
        }

        let user_requests = windows.by_user.entry(user_id.to_string()).or_default();
        user_requests.retain(|&timestamp| now.duration_since(timestamp) < self.window);

        if user_requests.len() < self.limit {
            user_requests.push(now);
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    fn tracked_users(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .by_user
            .len()
    }
}
