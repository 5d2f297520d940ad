use autoscale_scales::ScaleError;
use serde::{Deserialize, Serialize};

/// Options for [`make_numeric_scale_with`](crate::make_numeric_scale_with).
///
/// Every field has a default, so a partial (or empty) JSON object is a valid
/// options document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScaleOptions {
    pub nice: bool,
    /// Fraction of the span added below and above the domain
    pub pad_fraction: [f64; 2],
    pub include_zero_tolerance: f64,
    /// Values below 1 pick the count from the extent's optimal bin count
    pub desired_tick_count: i32,
    pub for_binning: bool,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            nice: true,
            pad_fraction: [0.0, 0.0],
            include_zero_tolerance: 0.0,
            desired_tick_count: 0,
            for_binning: false,
        }
    }
}

impl ScaleOptions {
    pub fn validate(&self) -> Result<(), ScaleError> {
        if let Some(pad) = self
            .pad_fraction
            .iter()
            .find(|pad| !(pad.is_finite() && **pad >= 0.0))
        {
            return Err(ScaleError::InvalidOption(format!(
                "pad fraction must be finite and non-negative, got {pad}"
            )));
        }
        if !(0.0..=1.0).contains(&self.include_zero_tolerance) {
            return Err(ScaleError::InvalidOption(format!(
                "include zero tolerance must be between 0 and 1, got {}",
                self.include_zero_tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let options: ScaleOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ScaleOptions::default());
        assert!(options.nice);
        assert_eq!(options.desired_tick_count, 0);
    }

    #[test]
    fn test_partial_json() {
        let options: ScaleOptions =
            serde_json::from_str(r#"{"padFraction": [0.1, 0.2], "forBinning": true}"#).unwrap();
        assert_eq!(options.pad_fraction, [0.1, 0.2]);
        assert!(options.for_binning);
        assert!(options.nice);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let negative_pad = ScaleOptions {
            pad_fraction: [-0.1, 0.0],
            ..Default::default()
        };
        assert!(matches!(
            negative_pad.validate(),
            Err(ScaleError::InvalidOption(msg)) if msg.contains("pad fraction")
        ));

        let tolerance = ScaleOptions {
            include_zero_tolerance: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            tolerance.validate(),
            Err(ScaleError::InvalidOption(msg)) if msg.contains("tolerance")
        ));
    }
}
