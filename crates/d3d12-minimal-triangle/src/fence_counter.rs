/// CPU-side view of the frame fence's monotonically increasing value.
#[derive(Debug)]
pub struct FenceCounter {
    next_value: u64,
}

impl FenceCounter {
    /// Value the fence object is created with.
    pub const INITIAL_VALUE: u64 = 0;

    pub fn new() -> Self {
        Self {
            next_value: Self::INITIAL_VALUE + 1,
        }
    }

    /// Value for the next queue signal. Every call returns a larger value.
    pub fn next_signal(&mut self) -> u64 {
        let value = self.next_value;
        self.next_value += 1;
        value
    }

    pub fn last_signaled(&self) -> Option<u64> {
        let last = self.next_value - 1;
        (last > Self::INITIAL_VALUE).then_some(last)
    }

    pub fn is_reached(completed_value: u64, signaled_value: u64) -> bool {
        completed_value >= signaled_value
    }
}

impl Default for FenceCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_signal_is_above_the_initial_value() {
        let mut counter = FenceCounter::new();
        assert_eq!(counter.last_signaled(), None);
        assert_eq!(counter.next_signal(), FenceCounter::INITIAL_VALUE + 1);
        assert_eq!(counter.last_signaled(), Some(1));
    }

    #[test]
    fn signals_strictly_increase() {
        let mut counter = FenceCounter::default();
        let values: Vec<u64> = (0..4).map(|_| counter.next_signal()).collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn completion_is_reached_at_or_past_the_signal() {
        assert!(!FenceCounter::is_reached(0, 1));
        assert!(FenceCounter::is_reached(1, 1));
        assert!(FenceCounter::is_reached(5, 3));
    }
}
