#[derive(Default, Debug, Copy, Clone)]
pub(crate) struct CumulativeMovingAverage {
    sum: u64,
    num_terms: u64,
}

impl CumulativeMovingAverage {
    pub(crate) fn add_term(&mut self, new_term: u64) {
        self.sum += new_term;
        self.num_terms += 1
    }

    /// Fold the terms of `other` into this average.
    pub(crate) fn combine(&mut self, other: &CumulativeMovingAverage) {
        self.sum += other.sum;
        self.num_terms += other.num_terms;
    }

    pub(crate) fn value(&self) -> f64 {
        if self.num_terms > 0 {
            (self.sum as f64) / (self.num_terms as f64)
        } else {
            0.0
        }
    }
}
