//! Scenario-wide time budget.

use std::time::Duration;

use tokio::time::Instant;

/// A fixed point in time after which no new work may start.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn start(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
            budget,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn at(&self) -> Instant {
        self.at
    }

    /// Time left, or `None` once the deadline has passed.
    pub fn remaining(&self) -> Option<Duration> {
        let left = self.at.saturating_duration_since(Instant::now());
        (!left.is_zero()).then_some(left)
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_deadline_runs_out() {
        let deadline = Deadline::start(Duration::from_secs(60));
        assert_eq!(deadline.remaining(), Some(Duration::from_secs(60)));
        assert!(!deadline.is_exhausted());

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(deadline.remaining(), Some(Duration::from_secs(1)));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(deadline.is_exhausted());
        assert_eq!(deadline.budget(), Duration::from_secs(60));
    }

    #[test]
    fn test_zero_budget_is_exhausted_immediately() {
        let deadline = Deadline::start(Duration::ZERO);
        assert!(deadline.is_exhausted());
    }
}
