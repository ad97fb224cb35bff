//! UI components library

pub mod battery;
pub mod button;
pub mod label;
pub mod plot;
pub mod readout;

pub use battery::BatteryGauge;
pub use button::Button;
pub use label::Label;
pub use plot::{FunctionPlot, PlotSource};
pub use readout::{NumericReadout, Probe};

/// Copy as much of `text` as fits into a fixed-capacity string.
pub(crate) fn truncated<const N: usize>(text: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Shown instead of a value whose text does not fit its buffer
pub(crate) const OVERFLOW_TEXT: &str = "---";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_keeps_leading_chars() {
        let short: heapless::String<4> = truncated("Charging");
        assert_eq!(short.as_str(), "Char");
        let exact: heapless::String<4> = truncated("Idle");
        assert_eq!(exact.as_str(), "Idle");
    }
}
