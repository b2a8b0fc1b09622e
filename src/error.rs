/// Errors reported by the fallible `DetectorModel` API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The requested frequency lies outside `FREQ_MIN_GHZ..=FREQ_MAX_GHZ`.
    #[error("frequency outside {}..={} GHz", crate::FREQ_MIN_GHZ, crate::FREQ_MAX_GHZ)]
    FrequencyOutOfRange,
    /// No calibration is available since the last requested frequency
    /// was rejected.
    #[error("no calibration for the current frequency")]
    Uncalibrated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            Error::FrequencyOutOfRange.to_string(),
            "frequency outside 0.05..=9 GHz"
        );
        assert_eq!(
            Error::Uncalibrated.to_string(),
            "no calibration for the current frequency"
        );
    }
}
