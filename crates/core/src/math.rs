use std::time::{Duration, Instant};

pub fn dot(lhs: &[f64], rhs: &[f64]) -> f64 {
    assert_eq!(lhs.len(), rhs.len(), "dot product dimension mismatch");
    lhs.iter().zip(rhs.iter()).map(|(a, b)| a * b).sum()
}

#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::{dot, Timer};

    #[test]
    fn test_dot() {
        let v = [3.0, 4.0];
        assert!((dot(&v, &v) - 25.0).abs() < 1e-9);
        assert!((dot(&v, &[1.0, 0.0]) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_timer_advances() {
        let timer = Timer::start();
        assert!(timer.elapsed() >= std::time::Duration::ZERO);
    }
}
