#![cfg_attr(not(test), no_std)]

mod band;
mod error;

pub use band::Coefficients;
pub use error::Error;

use log::{debug, trace, warn};

/// Lowest operating frequency of the detector (GHz).
pub const FREQ_MIN_GHZ: f64 = 0.05;

/// Highest operating frequency of the detector (GHz).
pub const FREQ_MAX_GHZ: f64 = 9.0;

/// Operating frequency of a newly created [`DetectorModel`] (GHz).
pub const DEFAULT_FREQUENCY_GHZ: f64 = 2.412;

/// Power reported by [`DetectorModel::rf_power`] when no calibration is
/// available (dBm).
pub const NO_CALIBRATION_DBM: f64 = -99.0;

/// Transfer function of the ADL5902 TruPwr detector.
///
/// Holds the operating frequency and the logarithmic slope and
/// intercept calibrated for it. The detector output voltage is sampled
/// by the caller and converted with [`rf_power`](DetectorModel::rf_power).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorModel {
    frequency_ghz: f64,
    slope: f64,
    intercept: f64,
}

impl Default for DetectorModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectorModel {
    /// Returns a model calibrated for [`DEFAULT_FREQUENCY_GHZ`].
    ///
    /// # Examples
    ///
    /// ```
    /// use adl5902::DetectorModel;
    ///
    /// let detector = DetectorModel::new();
    ///
    /// assert_eq!(detector.frequency_ghz(), 2.412);
    /// assert!(detector.is_calibrated());
    /// ```
    pub fn new() -> Self {
        let mut model = Self {
            frequency_ghz: DEFAULT_FREQUENCY_GHZ,
            slope: 0.0,
            intercept: 0.0,
        };
        model.update_parameters(DEFAULT_FREQUENCY_GHZ);
        model
    }

    /// Returns a model calibrated for `frequency_ghz`, or
    /// `Err(Error::FrequencyOutOfRange)` if the detector does not operate
    /// at that frequency.
    ///
    /// # Examples
    ///
    /// ```
    /// use adl5902::{DetectorModel, Error};
    ///
    /// let detector = DetectorModel::with_frequency(5.8).unwrap();
    /// assert_eq!(detector.frequency_ghz(), 5.8);
    ///
    /// assert_eq!(
    ///     DetectorModel::with_frequency(12.0),
    ///     Err(Error::FrequencyOutOfRange)
    /// );
    /// ```
    pub fn with_frequency(frequency_ghz: f64) -> Result<Self, Error> {
        let mut model = Self::new();
        model.try_set_frequency(frequency_ghz)?;
        Ok(model)
    }

    /// Sets the operating frequency and recalibrates.
    ///
    /// Returns `false` and leaves the frequency unchanged if
    /// `frequency_ghz` is outside `FREQ_MIN_GHZ..=FREQ_MAX_GHZ`. The
    /// calibration is cleared in that case, so
    /// [`rf_power`](DetectorModel::rf_power) reports
    /// [`NO_CALIBRATION_DBM`] until a valid frequency is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use adl5902::{DetectorModel, NO_CALIBRATION_DBM};
    ///
    /// let mut detector = DetectorModel::new();
    ///
    /// assert!(detector.set_frequency(0.9));
    /// assert!(!detector.set_frequency(9.5));
    ///
    /// assert_eq!(detector.frequency_ghz(), 0.9);
    /// assert_eq!(detector.rf_power(1.0), NO_CALIBRATION_DBM);
    /// ```
    pub fn set_frequency(&mut self, frequency_ghz: f64) -> bool {
        let in_range = (FREQ_MIN_GHZ..=FREQ_MAX_GHZ).contains(&frequency_ghz);

        if in_range {
            self.frequency_ghz = frequency_ghz;
        } else {
            warn!(
                "Rejected frequency {} GHz, keeping {} GHz uncalibrated",
                frequency_ghz, self.frequency_ghz
            );
        }

        self.update_parameters(frequency_ghz);
        in_range
    }

    /// Same as [`set_frequency`](DetectorModel::set_frequency), reporting
    /// a rejected frequency as `Err(Error::FrequencyOutOfRange)`.
    pub fn try_set_frequency(&mut self, frequency_ghz: f64) -> Result<(), Error> {
        if self.set_frequency(frequency_ghz) {
            Ok(())
        } else {
            Err(Error::FrequencyOutOfRange)
        }
    }

    /// Returns the input power (dBm) corresponding to the detector output
    /// `voltage` (V), or [`NO_CALIBRATION_DBM`] if the model is not
    /// calibrated.
    ///
    /// # Examples
    ///
    /// ```
    /// use adl5902::DetectorModel;
    ///
    /// let mut detector = DetectorModel::new();
    /// detector.set_frequency(0.05);
    ///
    /// // 53.8 mV/dB with an intercept of -62.1 dBm
    /// assert_eq!(detector.rf_power(0.538), -52.1);
    /// ```
    pub fn rf_power(&self, voltage: f64) -> f64 {
        self.try_rf_power(voltage).unwrap_or(NO_CALIBRATION_DBM)
    }

    /// Same as [`rf_power`](DetectorModel::rf_power), returning
    /// `Err(Error::Uncalibrated)` instead of [`NO_CALIBRATION_DBM`].
    pub fn try_rf_power(&self, voltage: f64) -> Result<f64, Error> {
        let coefficients = self.coefficients().ok_or(Error::Uncalibrated)?;
        let power = coefficients.power(voltage);
        trace!("{} V -> {} dBm", voltage, power);
        Ok(power)
    }

    /// Operating frequency (GHz).
    pub fn frequency_ghz(&self) -> f64 {
        self.frequency_ghz
    }

    /// Logarithmic slope (mV/dB), `0.0` when uncalibrated.
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Logarithmic intercept (dBm), `0.0` when uncalibrated.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Current calibration, or `None` when uncalibrated.
    pub fn coefficients(&self) -> Option<Coefficients> {
        self.is_calibrated().then_some(Coefficients {
            slope: self.slope,
            intercept: self.intercept,
        })
    }

    /// Returns `true` if both slope and intercept are nonzero.
    pub fn is_calibrated(&self) -> bool {
        self.slope != 0.0 && self.intercept != 0.0
    }

    fn update_parameters(&mut self, frequency_ghz: f64) {
        let Coefficients { slope, intercept } = band::coefficients(frequency_ghz).unwrap_or(
            Coefficients {
                slope: 0.0,
                intercept: 0.0,
            },
        );

        self.slope = slope;
        self.intercept = intercept;

        debug!(
            "{} GHz: slope {} mV/dB, intercept {} dBm",
            frequency_ghz, slope, intercept
        );
    }
}
