//! Conversions between basis indices and fixed-width bitstrings.
//!
//! Bitstrings are written most-significant bit first, so that character `i`
//! of the string is the state of qubit `i`.

use crate::error::{ DomainError, Result };

/// Largest register size accepted anywhere in the crate.
///
/// A dense state vector for this many qubits already holds 2<sup>24</sup>
/// complex amplitudes (256 MiB).
pub const MAX_QUBITS: usize = 24;

/// Check that `n` is a usable register size and return the dimension
/// 2<sup>`n`</sup> of its state space.
pub fn dim(n: usize) -> Result<usize> {
    if (1..=MAX_QUBITS).contains(&n) {
        Ok(1 << n)
    } else {
        Err(DomainError::RegisterSize { n, max: MAX_QUBITS }.into())
    }
}

/// Check that `index` is a basis index for `n` qubits.
pub fn check_index(index: usize, n: usize) -> Result<()> {
    let dim = dim(n)?;
    if index < dim {
        Ok(())
    } else {
        Err(DomainError::IndexOutOfRange { index, n, dim }.into())
    }
}

/// Render `index` as an `n`-character string over `{'0', '1'}`, MSB first and
/// zero-padded.
pub fn to_bitstring(index: usize, n: usize) -> Result<String> {
    check_index(index, n)?;
    Ok(format!("{:0width$b}", index, width = n))
}

/// Parse an MSB-first bitstring back into a basis index.
pub fn from_bitstring(bits: &str) -> Result<usize> {
    if bits.is_empty()
        || bits.len() > MAX_QUBITS
        || !bits.bytes().all(|b| b == b'0' || b == b'1')
    {
        return Err(DomainError::Bitstring(bits.to_string()).into());
    }
    Ok(bits.bytes().fold(0, |acc, b| (acc << 1) | (b - b'0') as usize))
}

/// Bit mask selecting qubit `k` within a basis index for `n` qubits.
#[inline]
pub(crate) fn qubit_mask(k: usize, n: usize) -> usize { 1 << (n - 1 - k) }

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bitstrings() {
        assert_eq!(to_bitstring(2, 2).unwrap(), "10");
        assert_eq!(to_bitstring(5, 3).unwrap(), "101");
        assert_eq!(to_bitstring(0, 4).unwrap(), "0000");
        assert_eq!(to_bitstring(1, 1).unwrap(), "1");
        assert!(to_bitstring(4, 2).unwrap_err().is_domain());
        assert!(to_bitstring(0, 0).unwrap_err().is_domain());
    }

    #[test]
    fn parse() {
        assert_eq!(from_bitstring("101").unwrap(), 5);
        assert_eq!(from_bitstring("0010").unwrap(), 2);
        assert!(from_bitstring("").is_err());
        assert!(from_bitstring("10a").is_err());
        for k in 0..8 {
            assert_eq!(from_bitstring(&to_bitstring(k, 3).unwrap()).unwrap(), k);
        }
    }

    #[test]
    fn masks_are_msb_first() {
        assert_eq!(qubit_mask(0, 3), 0b100);
        assert_eq!(qubit_mask(2, 3), 0b001);
        assert_eq!(dim(3).unwrap(), 8);
        assert!(dim(MAX_QUBITS + 1).is_err());
    }
}
