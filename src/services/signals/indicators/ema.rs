//! Exponential Moving Average (EMA).

/// Smoothing factor for a span: `2 / (span + 1)`.
pub fn smoothing(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Recursive EMA over `values`, one output per input.
///
/// The first output equals the first input and every later output is
/// `previous + alpha * (value - previous)`. There is no warm-up window and
/// no bias correction. A constant input yields exactly that constant.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = smoothing(span);
    let mut out = Vec::with_capacity(values.len());

    let mut iter = values.iter();
    let Some(&first) = iter.next() else {
        return out;
    };
    out.push(first);

    let mut prev = first;
    for &value in iter {
        prev += alpha * (value - prev);
        out.push(prev);
    }

    out
}
