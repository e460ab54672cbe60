//! Rate Limiting
//!
//! Sliding-window limiter with violation escalation. Each client key
//! (IP, plus browser fingerprint when supplied) gets a fixed request
//! budget per window; exceeding the budget repeatedly escalates to a
//! temporary ban. State is in-memory per process, matching a
//! single-instance deployment.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::GatewayConfig;

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    /// Denied; the client may retry after this many seconds.
    Denied { retry_after_secs: u64 },
}

impl RateDecision {
    pub fn is_denied(&self) -> bool {
        matches!(self, RateDecision::Denied { .. })
    }
}

#[derive(Debug, Clone)]
struct ClientEntry {
    count: u32,
    window_start: Instant,
    violations: u32,
    banned_until: Option<Instant>,
}

/// Per-process request limiter keyed by client identity.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    max_violations: u32,
    ban: Duration,
    entries: Mutex<HashMap<String, ClientEntry>>,
}

impl RateLimiter {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            max_requests: config.rate_limit_max_requests,
            window: config.rate_limit_window,
            max_violations: config.rate_limit_max_violations,
            ban: config.rate_limit_ban,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Check and record one request for `ip`, and independently for the
    /// fingerprint when present. Either key being over budget denies
    /// the request; the longer retry-after wins.
    pub fn check(&self, ip: &str, fingerprint: Option<&str>) -> RateDecision {
        self.check_at(ip, fingerprint, Instant::now())
    }

    pub fn check_at(&self, ip: &str, fingerprint: Option<&str>, now: Instant) -> RateDecision {
        let mut entries = self.entries.lock().expect("rate limiter poisoned");

        let ip_decision = self.check_key(&mut entries, ip, now);
        let fp_decision = fingerprint
            .map(|fp| self.check_key(&mut entries, &format!("fp:{fp}"), now))
            .unwrap_or(RateDecision::Allowed);

        match (ip_decision, fp_decision) {
            (RateDecision::Allowed, RateDecision::Allowed) => RateDecision::Allowed,
            (RateDecision::Denied { retry_after_secs: a }, RateDecision::Denied { retry_after_secs: b }) => {
                RateDecision::Denied {
                    retry_after_secs: a.max(b),
                }
            }
            (denied @ RateDecision::Denied { .. }, _) => denied,
            (_, denied) => denied,
        }
    }

    fn check_key(
        &self,
        entries: &mut HashMap<String, ClientEntry>,
        key: &str,
        now: Instant,
    ) -> RateDecision {
        let entry = entries.entry(key.to_string()).or_insert(ClientEntry {
            count: 0,
            window_start: now,
            violations: 0,
            banned_until: None,
        });

        if let Some(banned_until) = entry.banned_until {
            if now < banned_until {
                return RateDecision::Denied {
                    retry_after_secs: remaining_secs(banned_until, now),
                };
            }
            // Ban served; start over with a clean slate.
            *entry = ClientEntry {
                count: 0,
                window_start: now,
                violations: 0,
                banned_until: None,
            };
        }

        if now.duration_since(entry.window_start) >= self.window {
            entry.count = 0;
            entry.violations = 0;
            entry.window_start = now;
        }

        entry.count += 1;
        if entry.count <= self.max_requests {
            return RateDecision::Allowed;
        }

        entry.violations += 1;
        if entry.violations >= self.max_violations {
            let banned_until = now + self.ban;
            entry.banned_until = Some(banned_until);
            tracing::warn!(key, violations = entry.violations, "client banned");
            return RateDecision::Denied {
                retry_after_secs: remaining_secs(banned_until, now),
            };
        }

        RateDecision::Denied {
            retry_after_secs: remaining_secs(entry.window_start + self.window, now),
        }
    }
}

fn remaining_secs(until: Instant, now: Instant) -> u64 {
    until.saturating_duration_since(now).as_secs().max(1)
}
