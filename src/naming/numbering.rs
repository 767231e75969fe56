//! Sequence numbers for `{N}`.

#[derive(Debug, Clone)]
pub struct Counter {
    next: i64,
    increment: i64,
    width: usize,
}

impl Counter {
    /// Counter for `count` numbered files. With `zero_pad`, every number is padded
    /// to the width of the last one, `initial + increment * (count - 1)`.
    pub fn new(initial: i64, increment: i64, count: usize, zero_pad: bool) -> Self {
        let width = if zero_pad {
            let steps = count.saturating_sub(1) as i64;
            initial
                .saturating_add(increment.saturating_mul(steps))
                .to_string()
                .len()
        } else {
            0
        };
        Self {
            next: initial,
            increment,
            width,
        }
    }

    /// The current number, formatted; advances the counter.
    pub fn take(&mut self) -> String {
        let n = self.next;
        self.next = self.next.saturating_add(self.increment);
        format!("{n:0width$}", width = self.width)
    }
}
