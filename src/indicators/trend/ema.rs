//! EMA (Exponential Moving Average) indicator

/// Incremental EMA with smoothing factor `α = 2 / (span + 1)`.
///
/// The first observation seeds the average (no SMA warm-up), so every input
/// produces a value; early values simply carry less history.
#[derive(Debug, Clone)]
pub struct Ema {
    alpha: f64,
    value: Option<f64>,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        Self {
            alpha: 2.0 / (span as f64 + 1.0),
            value: None,
        }
    }

    /// Feed one value, return the current EMA
    pub fn update(&mut self, value: f64) -> f64 {
        let next = match self.value {
            Some(prev) => self.alpha * value + (1.0 - self.alpha) * prev,
            None => value,
        };
        self.value = Some(next);
        next
    }
}

/// EMA of a whole series, one output per input
pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    let mut ema = Ema::new(span);
    values.iter().map(|&v| ema.update(v)).collect()
}
