use std::collections::HashMap;

use thiserror::Error;

/// Bias added to a residual to form its seed code, so that the 511
/// possible residual values occupy codes `0..=510`.
const CODE_BIAS: i16 = 255;

/// Entry count at which both dictionaries freeze, keeping every code
/// representable in two bytes.
const MAX_DICTIONARY_SIZE: usize = 65536;

#[derive(Debug, Error)]
pub enum CompressionError {
    /// A code that is neither a dictionary entry nor the next entry
    /// about to be assigned. No encoder output contains one, so the
    /// stream is corrupt and decoding cannot continue.
    #[error("bad code {0} at stream position {1}")]
    BadCode(u16, usize),
}

/// Compress a residual sequence into a stream of dictionary codes.
///
/// The dictionary starts with one entry per possible residual value and
/// gains one entry each time a new sequence is seen, until it is full.
/// The decoder rebuilds the identical dictionary in the identical order,
/// so the stream carries no table information.
///
/// # Panics
///
/// Panics if a residual lies outside `[-255, 255]`; such a value cannot
/// come from differencing two 8-bit samples.
pub fn compress(residuals: &[i16]) -> Vec<u16> {
    let mut dictionary: HashMap<Vec<u8>, u16> = (-CODE_BIAS..=CODE_BIAS)
        .map(|r| (r.to_be_bytes().to_vec(), (r + CODE_BIAS) as u16))
        .collect();

    let mut output = Vec::new();
    let mut pending: Vec<u8> = Vec::new();

    for &residual in residuals {
        let symbol = residual.to_be_bytes();

        let mut extended = pending.clone();
        extended.extend_from_slice(&symbol);

        if dictionary.contains_key(&extended) {
            pending = extended;
        } else {
            output.push(dictionary[&pending]);
            if dictionary.len() < MAX_DICTIONARY_SIZE {
                dictionary.insert(extended, dictionary.len() as u16);
            }
            pending = symbol.to_vec();
        }
    }

    // Whatever is still pending matched a dictionary entry; flush it.
    if !pending.is_empty() {
        output.push(dictionary[&pending]);
    }

    output
}

/// Expand a code stream back into the residual sequence.
///
/// Mirrors [`compress`] step for step: each code after the first adds
/// exactly one dictionary entry while the table has room, so both sides
/// assign the same codes to the same sequences. A code equal to the next
/// unassigned code is the one legal forward reference, produced when the
/// encoder uses an entry in the same step that creates it; its sequence
/// must be the previous sequence extended by its own first symbol.
pub fn decompress(codes: &[u16]) -> Result<Vec<i16>, CompressionError> {
    let mut dictionary: Vec<Vec<u8>> = (-CODE_BIAS..=CODE_BIAS)
        .map(|r| r.to_be_bytes().to_vec())
        .collect();

    let mut residuals = Vec::new();
    let mut previous: Vec<u8> = Vec::new();

    for (position, &code) in codes.iter().enumerate() {
        let entry = if let Some(known) = dictionary.get(code as usize) {
            known.clone()
        } else if code as usize == dictionary.len() && !previous.is_empty() {
            let mut deferred = previous.clone();
            deferred.extend_from_slice(&previous[..2]);
            deferred
        } else {
            return Err(CompressionError::BadCode(code, position));
        };

        for symbol in entry.chunks_exact(2) {
            residuals.push(i16::from_be_bytes([symbol[0], symbol[1]]));
        }

        if !previous.is_empty() && dictionary.len() < MAX_DICTIONARY_SIZE {
            let mut created = previous;
            created.extend_from_slice(&entry[..2]);
            dictionary.push(created);
        }

        previous = entry;
    }

    Ok(residuals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_symbols_use_seed_codes() {
        // Residual r is seeded with code r + 255.
        assert_eq!(compress(&[-255]), vec![0]);
        assert_eq!(compress(&[0]), vec![255]);
        assert_eq!(compress(&[255]), vec![510]);

        assert_eq!(decompress(&[0, 255, 510]).unwrap(), vec![-255, 0, 255]);
    }

    #[test]
    fn round_trip_repetitive_sequence() {
        let mut residuals = Vec::new();
        for _ in 0..64 {
            residuals.extend_from_slice(&[0, 0, 1, -1, 2, 0, 0, 0]);
        }

        let codes = compress(&residuals);
        assert!(codes.len() < residuals.len());

        assert_eq!(decompress(&codes).unwrap(), residuals);
    }

    #[test]
    fn deferred_entry() {
        // A run of one symbol makes the encoder use entry 511 in the
        // same step that creates it, so the decoder receives a code one
        // past the end of its table and must synthesize the sequence.
        let codes = compress(&[1, 1, 1]);
        assert_eq!(codes, vec![256, 511]);

        assert_eq!(decompress(&codes).unwrap(), vec![1, 1, 1]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(compress(&[]), vec![]);
        assert_eq!(decompress(&[]).unwrap(), vec![]);
    }

    #[test]
    fn rejects_forward_reference_as_first_code() {
        // 511 is only legal once a previous sequence exists.
        assert!(matches!(
            decompress(&[511]),
            Err(CompressionError::BadCode(511, 0))
        ));
    }

    #[test]
    fn rejects_code_beyond_next_entry() {
        // After one code the table has 511 entries, so 513 references an
        // entry that cannot exist yet.
        assert!(matches!(
            decompress(&[256, 513]),
            Err(CompressionError::BadCode(513, 1))
        ));
    }

    #[test]
    fn dictionary_freezes_at_capacity() {
        // Enough low-repetition input to fill all 65536 entries and keep
        // coding past the freeze. A small linear congruential generator
        // gives a reproducible stream with few repeated runs.
        let mut state = 1u32;
        let residuals: Vec<i16> = (0..90_000)
            .map(|_| {
                state = state.wrapping_mul(1103515245).wrapping_add(12345);
                ((state >> 16) % 511) as i16 - 255
            })
            .collect();

        let codes = compress(&residuals);
        assert_eq!(decompress(&codes).unwrap(), residuals);
    }
}
