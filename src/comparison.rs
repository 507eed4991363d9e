use crate::constants::NORMALIZED_FIRST_PULSE;
use crate::error::SimError;

/// Result of comparing a simulated trace with a recording.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub sse: f64,
    pub sampled: Vec<f64>,
}

/// Expresses the glutamate trace as a percentage of the first stimulated step (index 1).
pub fn normalize_to_first_pulse(glu: &[f64]) -> Result<Vec<f64>, SimError> {
    let first = match glu.get(1) {
        Some(&g) if g != 0.0 => g,
        _ => {
            return Err(SimError::DivisionByZero {
                context: "normalization to the first pulse",
            })
        }
    };
    Ok(glu
        .iter()
        .map(|g| g / first * NORMALIZED_FIRST_PULSE)
        .collect())
}

pub fn sum_squared_error(reference: &[f64], calculated: &[f64]) -> Result<f64, SimError> {
    if reference.len() != calculated.len() {
        return Err(SimError::LengthMismatch {
            expected: reference.len(),
            actual: calculated.len(),
        });
    }
    Ok(reference
        .iter()
        .zip(calculated)
        .map(|(r, c)| (r - c).powi(2))
        .sum())
}

/// Normalizes `glu`, samples it at `spike_indices` and scores it against `reference`.
pub fn compare(
    glu: &[f64],
    spike_indices: &[usize],
    reference: &[f64],
) -> Result<Comparison, SimError> {
    let normalized = normalize_to_first_pulse(glu)?;
    let sampled = spike_indices
        .iter()
        .map(|&i| {
            normalized.get(i).copied().ok_or(SimError::LengthMismatch {
                expected: i + 1,
                actual: normalized.len(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let sse = sum_squared_error(reference, &sampled)?;
    Ok(Comparison { sse, sampled })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perfect_match_has_zero_error() {
        let glu = [0.0, 2.0, 0.0, 3.0, 0.0, 4.0];
        let reference = [100.0, 150.0, 200.0];
        let result = compare(&glu, &[1, 3, 5], &reference).unwrap();
        assert_eq!(result.sampled, reference.to_vec());
        assert_eq!(result.sse, 0.0);
    }

    #[test]
    fn error_is_symmetric() {
        let a = [100.0, 140.0, 170.0, 90.0];
        let b = [100.0, 120.0, 180.0, 60.0];
        let ab = sum_squared_error(&a, &b).unwrap();
        let ba = sum_squared_error(&b, &a).unwrap();
        assert_eq!(ab, ba);
        assert_relative_eq!(ab, 400.0 + 100.0 + 900.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_first_sample_fails() {
        let glu = [0.0, 0.0, 1.0];
        assert!(matches!(
            compare(&glu, &[2], &[100.0]),
            Err(SimError::DivisionByZero { .. })
        ));
        assert!(matches!(
            normalize_to_first_pulse(&[0.0]),
            Err(SimError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn length_mismatch_fails_fast() {
        let glu = [0.0, 2.0, 0.0, 3.0];
        assert_eq!(
            compare(&glu, &[1, 3], &[100.0, 150.0, 175.0]),
            Err(SimError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert!(matches!(
            compare(&glu, &[1, 9], &[100.0, 150.0]),
            Err(SimError::LengthMismatch { .. })
        ));
    }
}
