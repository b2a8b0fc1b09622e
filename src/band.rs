use crate::{FREQ_MAX_GHZ, FREQ_MIN_GHZ};

/// Logarithmic slope and intercept of the detector at one frequency.
///
/// - `slope`: mV of detector output per dB of input power (mV/dB)
/// - `intercept`: input power at zero effective output (dBm)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub slope: f64,
    pub intercept: f64,
}

impl Coefficients {
    /// Applies the detector transfer function to `voltage` (V) and
    /// returns the input power in dBm.
    ///
    /// # Examples
    ///
    /// ```
    /// use adl5902::Coefficients;
    ///
    /// let coefficients = Coefficients {
    ///     slope: 50.0,
    ///     intercept: -60.0,
    /// };
    ///
    /// // 1 V is 1000 mV, or 20 dB above the intercept
    /// assert_eq!(coefficients.power(1.0), -40.0);
    /// ```
    pub fn power(&self, voltage: f64) -> f64 {
        self.intercept + voltage * 1000.0 / self.slope
    }
}

/// `constant + per_ghz * f`
#[derive(Debug, Clone, Copy)]
struct Affine {
    constant: f64,
    per_ghz: f64,
}

impl Affine {
    const fn new(constant: f64, per_ghz: f64) -> Self {
        Self { constant, per_ghz }
    }

    fn at(&self, frequency_ghz: f64) -> f64 {
        self.constant + self.per_ghz * frequency_ghz
    }
}

#[derive(Debug, Clone, Copy)]
struct Band {
    lower_ghz: f64,
    upper_ghz: f64,
    intercept: Affine,
    slope: Affine,
}

impl Band {
    const fn new(lower_ghz: f64, upper_ghz: f64, intercept: Affine, slope: Affine) -> Self {
        Self {
            lower_ghz,
            upper_ghz,
            intercept,
            slope,
        }
    }

    /// Bands are half-open, except the last one which also holds
    /// `FREQ_MAX_GHZ`.
    fn contains(&self, frequency_ghz: f64) -> bool {
        frequency_ghz >= self.lower_ghz
            && (frequency_ghz < self.upper_ghz
                || (self.upper_ghz == FREQ_MAX_GHZ && frequency_ghz == FREQ_MAX_GHZ))
    }

    fn coefficients(&self, frequency_ghz: f64) -> Coefficients {
        Coefficients {
            slope: self.slope.at(frequency_ghz),
            intercept: self.intercept.at(frequency_ghz),
        }
    }
}

// Datasheet calibration curve, ascending by frequency.
const BANDS: [Band; 12] = [
    Band::new(FREQ_MIN_GHZ, 0.1, Affine::new(-62.1, 0.0), Affine::new(53.8, 0.0)),
    Band::new(
        0.1,
        0.7,
        Affine::new(-61.98333, -1.16667),
        Affine::new(53.81667, -0.16667),
    ),
    Band::new(0.7, 0.9, Affine::new(-63.15, 0.5), Affine::new(53.7, 0.0)),
    Band::new(0.9, 1.4, Affine::new(-67.884, 5.76), Affine::new(55.086, -1.54)),
    Band::new(1.4, 1.9, Affine::new(-52.036, -5.56), Affine::new(53.854, -0.66)),
    Band::new(
        1.9,
        2.14,
        Affine::new(-60.225, -1.25),
        Affine::new(54.18333, -0.83333),
    ),
    Band::new(
        2.14,
        2.6,
        Affine::new(-66.62174, 1.73913),
        Affine::new(58.91304, -3.04348),
    ),
    Band::new(
        2.6,
        3.5,
        Affine::new(-59.2111, -1.11111),
        Affine::new(55.04444, -1.55556),
    ),
    Band::new(
        3.5,
        5.8,
        Affine::new(-76.79565, 3.91304),
        Affine::new(60.1, -3.0),
    ),
    Band::new(
        5.8,
        7.0,
        Affine::new(-67.63333, 2.33333),
        Affine::new(66.64917, -4.12917),
    ),
    Band::new(7.0, 8.0, Affine::new(-64.6, 1.9), Affine::new(58.325, -2.94)),
    Band::new(
        8.0,
        FREQ_MAX_GHZ,
        Affine::new(-79.0, 3.7),
        Affine::new(58.365, -2.945),
    ),
];

/// Returns the calibration coefficients for `frequency_ghz`, taken from
/// the first band that contains it, or `None` outside
/// `FREQ_MIN_GHZ..=FREQ_MAX_GHZ`.
pub fn coefficients(frequency_ghz: f64) -> Option<Coefficients> {
    BANDS
        .iter()
        .find(|band| band.contains(frequency_ghz))
        .map(|band| band.coefficients(frequency_ghz))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_coefficients(frequency_ghz: f64, intercept: f64, slope: f64) {
        assert_eq!(
            coefficients(frequency_ghz),
            Some(Coefficients { slope, intercept }),
            "at {} GHz",
            frequency_ghz
        );
    }

    #[test]
    fn bands_are_contiguous() {
        assert_eq!(BANDS.first().unwrap().lower_ghz, FREQ_MIN_GHZ);
        assert_eq!(BANDS.last().unwrap().upper_ghz, FREQ_MAX_GHZ);
        assert!(BANDS.windows(2).all(|w| w[0].upper_ghz == w[1].lower_ghz));
    }

    #[test]
    fn constant_band() {
        assert_coefficients(0.05, -62.1, 53.8);
        assert_coefficients(0.075, -62.1, 53.8);
        assert_coefficients(0.099, -62.1, 53.8);
    }

    #[test]
    fn every_band_formula() {
        let f = 0.4;
        assert_coefficients(f, -61.98333 - 1.16667 * f, 53.81667 - 0.16667 * f);
        let f = 0.8;
        assert_coefficients(f, -63.15 + 0.5 * f, 53.7);
        let f = 1.2;
        assert_coefficients(f, -67.884 + 5.76 * f, 55.086 - 1.54 * f);
        let f = 1.6;
        assert_coefficients(f, -52.036 - 5.56 * f, 53.854 - 0.66 * f);
        let f = 2.0;
        assert_coefficients(f, -60.225 - 1.25 * f, 54.18333 - 0.83333 * f);
        let f = 2.412;
        assert_coefficients(f, -66.62174 + 1.73913 * f, 58.91304 - 3.04348 * f);
        let f = 3.0;
        assert_coefficients(f, -59.2111 - 1.11111 * f, 55.04444 - 1.55556 * f);
        let f = 5.0;
        assert_coefficients(f, -76.79565 + 3.91304 * f, 60.1 - 3.0 * f);
        let f = 6.5;
        assert_coefficients(f, -67.63333 + 2.33333 * f, 66.64917 - 4.12917 * f);
        let f = 7.5;
        assert_coefficients(f, -64.6 + 1.9 * f, 58.325 - 2.94 * f);
        let f = 8.5;
        assert_coefficients(f, -79.0 + 3.7 * f, 58.365 - 2.945 * f);
    }

    #[test]
    fn boundaries_belong_to_next_band() {
        let f = 0.1;
        assert_coefficients(f, -61.98333 - 1.16667 * f, 53.81667 - 0.16667 * f);
        let f = 0.7;
        assert_coefficients(f, -63.15 + 0.5 * f, 53.7);
        let f = 0.9;
        assert_coefficients(f, -67.884 + 5.76 * f, 55.086 - 1.54 * f);
        let f = 1.4;
        assert_coefficients(f, -52.036 - 5.56 * f, 53.854 - 0.66 * f);
        let f = 1.9;
        assert_coefficients(f, -60.225 - 1.25 * f, 54.18333 - 0.83333 * f);
        let f = 2.14;
        assert_coefficients(f, -66.62174 + 1.73913 * f, 58.91304 - 3.04348 * f);
        let f = 2.6;
        assert_coefficients(f, -59.2111 - 1.11111 * f, 55.04444 - 1.55556 * f);
        let f = 3.5;
        assert_coefficients(f, -76.79565 + 3.91304 * f, 60.1 - 3.0 * f);
        let f = 5.8;
        assert_coefficients(f, -67.63333 + 2.33333 * f, 66.64917 - 4.12917 * f);
        let f = 7.0;
        assert_coefficients(f, -64.6 + 1.9 * f, 58.325 - 2.94 * f);
        let f = 8.0;
        assert_coefficients(f, -79.0 + 3.7 * f, 58.365 - 2.945 * f);
    }

    #[test]
    fn upper_limit_is_inclusive() {
        assert_coefficients(9.0, -79.0 + 3.7 * 9.0, 58.365 - 2.945 * 9.0);
        let c = coefficients(9.0).unwrap();
        assert!((c.intercept - -45.7).abs() < 1e-9);
        assert!((c.slope - 31.86).abs() < 1e-9);
    }

    #[test]
    fn outside_range() {
        assert_eq!(coefficients(0.0), None);
        assert_eq!(coefficients(0.049999), None);
        assert_eq!(coefficients(-1.0), None);
        assert_eq!(coefficients(9.000001), None);
        assert_eq!(coefficients(9.5), None);
        assert_eq!(coefficients(f64::NAN), None);
        assert_eq!(coefficients(f64::INFINITY), None);
    }

    #[test]
    fn power() {
        let c = Coefficients {
            slope: 50.0,
            intercept: -60.0,
        };
        assert_eq!(c.power(0.0), -60.0);
        assert_eq!(c.power(0.5), -50.0);
        assert_eq!(c.power(2.0), -20.0);
    }
}
