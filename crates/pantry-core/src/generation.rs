use std::sync::atomic::{AtomicU64, Ordering};

/// Tag identifying one request of an async flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gen-{}", self.0)
    }
}

/// Monotonic request counter for one flow.
///
/// Each new request takes the next generation; a response is applied only if
/// its generation is still the latest one handed out.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    latest: AtomicU64,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding all earlier ones.
    pub fn next(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::Acquire) == generation.0
    }

    pub fn latest(&self) -> Generation {
        Generation(self.latest.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generations_increase() {
        let generations = RequestGeneration::new();
        let g1 = generations.next();
        let g2 = generations.next();
        assert!(g1 < g2);
        assert_eq!(generations.latest(), g2);
    }

    #[test]
    fn test_only_latest_is_current() {
        let generations = RequestGeneration::new();
        let g1 = generations.next();
        assert!(generations.is_current(g1));

        let g2 = generations.next();
        assert!(!generations.is_current(g1));
        assert!(generations.is_current(g2));
    }

    #[test]
    fn test_display() {
        assert_eq!(Generation(7).to_string(), "gen-7");
    }
}
