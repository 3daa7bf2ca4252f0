//! Parsing of human-readable byte sizes as printed by the ZFS tools.

/// Error returned when a string cannot be interpreted as a byte size.
///
/// # Examples
///
/// ```
/// use zfsmon_common::size::{parse_size, SizeFormatError};
///
/// let err: SizeFormatError = parse_size("10Q").unwrap_err();
/// assert_eq!(err.value, "10Q");
/// assert!(err.to_string().contains("10Q"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse {value:?} as a byte size")]
pub struct SizeFormatError {
    /// The input that failed to parse.
    pub value: String,
}

/// Binary-prefix suffixes in ascending order; each step is 1024x.
const SUFFIXES: &[char] = &['K', 'M', 'G', 'T', 'P', 'E'];

/// Parses a size string as printed by `zpool list` / `zfs list` into a
/// byte count.
///
/// Accepted forms are a plain number (raw bytes), a number with a
/// binary-prefix suffix (`K`, `M`, `G`, `T`, `P`, `E`, case-insensitive,
/// each 1024x the previous), and the `-` sentinel the tools print for
/// properties with no value, which parses to zero. Fractional values
/// such as `1.25G` are truncated toward zero after scaling.
///
/// # Errors
///
/// Returns [`SizeFormatError`] for any other input, including values
/// that would overflow a `u64`.
///
/// # Examples
///
/// ```
/// use zfsmon_common::size::parse_size;
///
/// assert_eq!(parse_size("512"), Ok(512));
/// assert_eq!(parse_size("10G"), Ok(10 * 1024 * 1024 * 1024));
/// assert_eq!(parse_size("1.5K"), Ok(1536));
/// assert_eq!(parse_size("-"), Ok(0));
/// assert!(parse_size("1.76x").is_err());
/// ```
pub fn parse_size(text: &str) -> Result<u64, SizeFormatError> {
    let trimmed = text.trim();
    if trimmed == "-" {
        return Ok(0);
    }

    let err = || SizeFormatError {
        value: text.to_string(),
    };

    let (number, scale) = match trimmed.chars().last() {
        None => return Err(err()),
        Some(last) if last.is_ascii_alphabetic() => {
            let exponent = SUFFIXES
                .iter()
                .position(|s| *s == last.to_ascii_uppercase())
                .ok_or_else(err)?;
            let scale = 1024u64.pow(exponent as u32 + 1);
            (&trimmed[..trimmed.len() - 1], scale)
        }
        Some(_) => (trimmed, 1),
    };

    // Whole numbers stay on an exact integer path; only fractional
    // values go through f64.
    if let Ok(whole) = number.parse::<u64>() {
        return whole.checked_mul(scale).ok_or_else(err);
    }

    let fractional: f64 = number.parse().map_err(|_| err())?;
    if !fractional.is_finite() || fractional < 0.0 {
        return Err(err());
    }
    let bytes = fractional * scale as f64;
    if bytes >= u64::MAX as f64 {
        return Err(err());
    }
    Ok(bytes as u64)
}
