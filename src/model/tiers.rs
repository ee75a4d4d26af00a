/// How a row's lower bound is compared against the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// `value >= bound`
    Inclusive,
    /// `value > bound`
    Exclusive,
}

/// Ordered `(lower_bound, output)` rows, scanned top-down; the first matching
/// row wins and `fallback` covers everything below the last row.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdTable<T: 'static> {
    bound: Bound,
    rows: &'static [(f64, T)],
    fallback: T,
}

impl<T: Copy + 'static> ThresholdTable<T> {
    pub const fn new(bound: Bound, rows: &'static [(f64, T)], fallback: T) -> Self {
        Self {
            bound,
            rows,
            fallback,
        }
    }

    pub fn lookup(&self, value: f64) -> T {
        self.rows
            .iter()
            .find(|(threshold, _)| match self.bound {
                Bound::Inclusive => value >= *threshold,
                Bound::Exclusive => value > *threshold,
            })
            .map(|(_, output)| *output)
            .unwrap_or(self.fallback)
    }

    pub fn rows(&self) -> &'static [(f64, T)] {
        self.rows
    }
}
