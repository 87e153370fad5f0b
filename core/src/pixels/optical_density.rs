use crate::error::{DdsmError, Result};
use crate::types::{ScanInstitution, ScannerType};
use ndarray::{Array2, ArrayBase, Data, Ix2};

/// Lowest optical density kept, darker readings are scanner noise
pub const MIN_OPTICAL_DENSITY: f64 = 0.05;

/// Highest physically plausible optical density
pub const MAX_OPTICAL_DENSITY: f64 = 3.0;

/// Gray level to optical density calibration of one digitizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Calibration {
    /// MGH, DBA scanner: logarithmic response
    MghDba,
    /// MGH, Howtek scanner
    MghHowtek,
    /// WFU, Lumisys scanner
    WfuLumisys,
    /// ISMD, Howtek scanner
    IsmdHowtek,
}

impl Calibration {
    /// Selects the calibration by exact `(institution, scanner)` match
    ///
    /// # Errors
    ///
    /// Returns `UnknownCalibration` for any other pair. Raw values are never
    /// passed through uncalibrated.
    pub fn for_scanner(institution: ScanInstitution, scanner_type: ScannerType) -> Result<Self> {
        match (institution, scanner_type) {
            (ScanInstitution::Mgh, ScannerType::Dba) => Ok(Calibration::MghDba),
            (ScanInstitution::Mgh, ScannerType::Howtek) => Ok(Calibration::MghHowtek),
            (ScanInstitution::Wfu, ScannerType::Lumisys) => Ok(Calibration::WfuLumisys),
            (ScanInstitution::Ismd, ScannerType::Howtek) => Ok(Calibration::IsmdHowtek),
            _ => Err(DdsmError::UnknownCalibration {
                institution: institution.to_string(),
                scanner_type: scanner_type.to_string(),
            }),
        }
    }

    /// Evaluates the calibration formula without clamping
    #[inline]
    pub fn optical_density(&self, v: f64) -> f64 {
        match self {
            Calibration::MghDba => ((v + 1.0).log10() - 4.80662) / -1.07553,
            Calibration::MghHowtek => -0.00094568 * v + 3.789,
            Calibration::WfuLumisys => (v - 4096.99) / -1009.01,
            Calibration::IsmdHowtek => -0.00099055807612 * v + 3.96604095240593,
        }
    }

    /// Evaluates the formula and clamps to the valid density range
    #[inline]
    pub fn corrected(&self, v: f64) -> f64 {
        clamp_density(self.optical_density(v))
    }
}

/// Clamps to `[MIN_OPTICAL_DENSITY, MAX_OPTICAL_DENSITY]`
#[inline]
pub fn clamp_density(od: f64) -> f64 {
    od.clamp(MIN_OPTICAL_DENSITY, MAX_OPTICAL_DENSITY)
}

/// Maps a gray-level matrix to clamped optical density
///
/// Every returned value lies in `[MIN_OPTICAL_DENSITY, MAX_OPTICAL_DENSITY]`.
///
/// # Errors
///
/// - `UnknownCalibration` if no formula exists for the scanner
/// - `InvalidValue` if a gray level has no density under the formula (NaN, or
///   below -1 for the logarithmic DBA response)
pub fn od_correct<S>(
    gray: &ArrayBase<S, Ix2>,
    institution: ScanInstitution,
    scanner_type: ScannerType,
) -> Result<Array2<f64>>
where
    S: Data<Elem = f64>,
{
    let calibration = Calibration::for_scanner(institution, scanner_type)?;
    if let Some(v) = gray
        .iter()
        .find(|v| calibration.optical_density(**v).is_nan())
    {
        return Err(DdsmError::InvalidValue(format!(
            "gray level {} has no optical density under {:?}",
            v, calibration
        )));
    }
    Ok(gray.mapv(|v| calibration.corrected(v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};
    use rstest::rstest;

    fn assert_close(actual: &Array2<f64>, expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!(
                (a - e).abs() <= 1e-8 + 1e-5 * e.abs(),
                "{} != {} (got {:?})",
                a,
                e,
                actual
            );
        }
    }

    fn test_image() -> Array2<f64> {
        array![[0.0, 1000.0, 2000.0, 3000.0, 4095.0]]
    }

    #[rstest]
    #[case(ScanInstitution::Mgh, ScannerType::Dba, [3.0, 1.679345, 1.39965683, 1.235999, 1.11039213])]
    #[case(ScanInstitution::Mgh, ScannerType::Howtek, [3.0, 2.84332, 1.89764, 0.95196, 0.05])]
    #[case(ScanInstitution::Wfu, ScannerType::Lumisys, [3.0, 3.0, 2.07826483, 1.08719438, 0.05])]
    #[case(ScanInstitution::Ismd, ScannerType::Howtek, [3.0, 2.97548288, 1.9849248, 0.99436672, 0.05])]
    fn test_reference_vectors(
        #[case] institution: ScanInstitution,
        #[case] scanner_type: ScannerType,
        #[case] expected: [f64; 5],
    ) {
        let od = od_correct(&test_image(), institution, scanner_type).unwrap();
        assert_close(&od, &expected);
    }

    #[rstest]
    #[case(Calibration::MghDba, 4.80662 / 1.07553)]
    #[case(Calibration::MghHowtek, 3.789)]
    #[case(Calibration::WfuLumisys, 4096.99 / 1009.01)]
    #[case(Calibration::IsmdHowtek, 3.96604095240593)]
    fn test_intercepts(#[case] calibration: Calibration, #[case] intercept: f64) {
        assert!((calibration.optical_density(0.0) - intercept).abs() < 1e-12);
        let clamped = calibration.corrected(0.0);
        assert!((MIN_OPTICAL_DENSITY..=MAX_OPTICAL_DENSITY).contains(&clamped));
    }

    #[test]
    fn test_output_always_in_range() {
        let gray: Array2<f64> = Array1::linspace(0.0, 70000.0, 2000)
            .into_shape((40, 50))
            .unwrap();
        for (institution, scanner_type) in [
            (ScanInstitution::Mgh, ScannerType::Dba),
            (ScanInstitution::Mgh, ScannerType::Howtek),
            (ScanInstitution::Wfu, ScannerType::Lumisys),
            (ScanInstitution::Ismd, ScannerType::Howtek),
        ] {
            let od = od_correct(&gray, institution, scanner_type).unwrap();
            assert_eq!(od.dim(), (40, 50));
            assert!(od
                .iter()
                .all(|v| (MIN_OPTICAL_DENSITY..=MAX_OPTICAL_DENSITY).contains(v)));
        }
    }

    #[test]
    fn test_unknown_calibration() {
        let pairs = [
            (ScanInstitution::Mgh, ScannerType::Lumisys),
            (ScanInstitution::Wfu, ScannerType::Dba),
            (ScanInstitution::Wfu, ScannerType::Howtek),
            (ScanInstitution::Ismd, ScannerType::Dba),
            (ScanInstitution::Ismd, ScannerType::Lumisys),
        ];
        for (institution, scanner_type) in pairs {
            let err = od_correct(&test_image(), institution, scanner_type).unwrap_err();
            assert!(matches!(err, DdsmError::UnknownCalibration { .. }));
        }
    }

    #[rstest]
    #[case(ScanInstitution::Mgh, ScannerType::Dba, f64::NAN)]
    #[case(ScanInstitution::Mgh, ScannerType::Dba, -5.0)]
    #[case(ScanInstitution::Mgh, ScannerType::Dba, f64::NEG_INFINITY)]
    #[case(ScanInstitution::Wfu, ScannerType::Lumisys, f64::NAN)]
    fn test_undefined_density_rejected(
        #[case] institution: ScanInstitution,
        #[case] scanner_type: ScannerType,
        #[case] value: f64,
    ) {
        let gray = array![[100.0, value]];
        let err = od_correct(&gray, institution, scanner_type).unwrap_err();
        assert!(matches!(err, DdsmError::InvalidValue(_)));
    }

    #[test]
    fn test_infinite_gray_levels_clamp() {
        let gray = array![[f64::INFINITY, f64::NEG_INFINITY, -1.0]];
        let od = od_correct(&gray, ScanInstitution::Ismd, ScannerType::Howtek).unwrap();
        assert_eq!(od, array![[MIN_OPTICAL_DENSITY, MAX_OPTICAL_DENSITY, MAX_OPTICAL_DENSITY]]);

        let err = od_correct(&gray, ScanInstitution::Mgh, ScannerType::Dba).unwrap_err();
        assert!(matches!(err, DdsmError::InvalidValue(_)));
    }

    #[test]
    fn test_clamp_bounds_inclusive() {
        assert_eq!(clamp_density(0.05), 0.05);
        assert_eq!(clamp_density(3.0), 3.0);
        assert_eq!(clamp_density(-1.0), 0.05);
        assert_eq!(clamp_density(10.0), 3.0);
    }
}
