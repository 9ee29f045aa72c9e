//! Bounded linear-backoff retry for best-effort calls.

use std::{future::Future, time::Duration};

/// Up to `attempts` tries; after failed attempt `n` the caller waits
/// `n * 2 * unit` before trying again. No wait follows the final attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  pub attempts: u32,
  pub unit:     Duration,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      attempts: 3,
      unit:     Duration::from_secs(1),
    }
  }
}

impl RetryPolicy {
  pub fn with_unit(unit: Duration) -> Self {
    Self {
      unit,
      ..Self::default()
    }
  }

  /// Delay after failed attempt `attempt` (1-based).
  pub fn delay_after(&self, attempt: u32) -> Duration {
    self.unit * attempt.saturating_mul(2)
  }

  /// Run `op` until it succeeds or the attempts are exhausted, returning the
  /// last error in the latter case. `label` names the operation in logs.
  pub async fn run<T, E, F, Fut>(&self, label: &str, mut op: F) -> Result<T, E>
  where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
  {
    let attempts = self.attempts.max(1);
    let mut attempt = 1;
    loop {
      match op(attempt).await {
        Ok(v) => return Ok(v),
        Err(e) if attempt >= attempts => return Err(e),
        Err(e) => {
          let wait = self.delay_after(attempt);
          tracing::warn!(
            attempt,
            retry_in = ?wait,
            error = %e,
            "{label} failed; retrying"
          );
          tokio::time::sleep(wait).await;
          attempt += 1;
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicU32, Ordering};

  use super::*;

  #[test]
  fn delays_grow_linearly() {
    let p = RetryPolicy::default();
    assert_eq!(p.delay_after(1), Duration::from_secs(2));
    assert_eq!(p.delay_after(2), Duration::from_secs(4));
    assert_eq!(p.delay_after(3), Duration::from_secs(6));
  }

  #[tokio::test]
  async fn stops_at_first_success() {
    let calls = AtomicU32::new(0);
    let p = RetryPolicy::with_unit(Duration::ZERO);
    let out: Result<u32, String> = p
      .run("op", |attempt| {
        calls.fetch_add(1, Ordering::SeqCst);
        async move {
          if attempt < 2 { Err("nope".to_string()) } else { Ok(attempt) }
        }
      })
      .await;
    assert_eq!(out, Ok(2));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn gives_up_after_three_attempts_with_last_error() {
    let calls = AtomicU32::new(0);
    let p = RetryPolicy::with_unit(Duration::ZERO);
    let out: Result<(), String> = p
      .run("op", |attempt| {
        calls.fetch_add(1, Ordering::SeqCst);
        async move { Err(format!("fail {attempt}")) }
      })
      .await;
    assert_eq!(out, Err("fail 3".to_string()));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
  }
}
