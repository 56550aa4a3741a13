use thiserror::Error;

/// A sample or residual count that cannot fill a grid of the declared
/// dimensions.
#[derive(Debug, Error)]
#[error("{got} values do not fill a {rows}×{cols}×{channels} grid ({expected} expected)")]
pub struct ShapeError {
    pub rows: u32,
    pub cols: u32,
    pub channels: u32,
    pub expected: usize,
    pub got: usize,
}

/// Replace every sample with its difference from the sample before it in
/// scan order (row-major, then column, then channel, wrapping across row
/// boundaries). The first sample has no predecessor and passes through
/// unchanged.
///
/// Smooth images produce long runs of near-zero residuals, which is what
/// makes the dictionary coder downstream effective.
pub fn diff_scan(samples: &[u8]) -> Vec<i16> {
    let mut residuals = Vec::with_capacity(samples.len());

    let mut previous = 0i16;
    for &sample in samples {
        residuals.push(sample as i16 - previous);
        previous = sample as i16;
    }

    residuals
}

/// Rebuild absolute samples from [`diff_scan`] residuals, walking the
/// same scan order and re-deriving each predictor from the samples
/// already reconstructed.
///
/// Fails with [`ShapeError`] when the residual count does not match the
/// declared dimensions.
pub fn scan_diff(
    residuals: &[i16],
    rows: u32,
    cols: u32,
    channels: u32,
) -> Result<Vec<u8>, ShapeError> {
    let expected = rows as usize * cols as usize * channels as usize;
    if residuals.len() != expected {
        return Err(ShapeError {
            rows,
            cols,
            channels,
            expected,
            got: residuals.len(),
        });
    }

    let mut samples = Vec::with_capacity(expected);

    let mut previous = 0i16;
    for &residual in residuals {
        let sample = (previous + residual) as u8;
        samples.push(sample);
        previous = sample as i16;
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_residuals() {
        // 2×2 grayscale grid, scanned row by row; the row start is
        // predicted from the end of the previous row.
        let samples = [10, 12, 200, 201];

        assert_eq!(diff_scan(&samples), vec![10, 2, 188, 1]);
    }

    #[test]
    fn scan_diff_inverts_diff_scan() {
        let samples: Vec<u8> = (0..=255).chain((0..=255).rev()).collect();

        let residuals = diff_scan(&samples);
        let rebuilt = scan_diff(&residuals, 4, 128, 1).unwrap();

        assert_eq!(rebuilt, samples);
    }

    #[test]
    fn residual_extremes() {
        // Alternating black and white hits both ends of the residual
        // range without truncation.
        let samples = [0, 255, 0, 255, 0, 255];

        let residuals = diff_scan(&samples);
        assert_eq!(residuals, vec![0, 255, -255, 255, -255, 255]);

        assert_eq!(scan_diff(&residuals, 1, 2, 3).unwrap(), samples);
    }

    #[test]
    fn first_sample_is_absolute() {
        assert_eq!(diff_scan(&[255]), vec![255]);
        assert_eq!(scan_diff(&[255], 1, 1, 1).unwrap(), vec![255]);
    }

    #[test]
    fn empty_grid() {
        assert_eq!(diff_scan(&[]), vec![]);
        assert_eq!(scan_diff(&[], 0, 0, 1).unwrap(), vec![]);
    }

    #[test]
    fn shape_mismatch() {
        let err = scan_diff(&[1, 2, 3], 2, 2, 1).unwrap_err();

        assert_eq!(err.expected, 4);
        assert_eq!(err.got, 3);
    }
}
