//! Brazilian national identifiers with modulo-11 check digits.
//!
//! A CNPJ (company register) is 8 random digits, the `0001` branch code, and
//! two check digits. A CPF (individual register) is 9 random digits and two
//! check digits. Both use the same positional-weight rule: sum the weighted
//! digits, take the remainder modulo 11, and emit `0` when it is below 2,
//! `11 - remainder` otherwise.

use crate::source::UniformSource;
use std::fmt;

/// Branch code appended to every generated CNPJ base.
pub const CNPJ_BRANCH: [u8; 4] = [0, 0, 0, 1];

/// Weights for the first CNPJ check digit.
pub const CNPJ_WEIGHTS_FIRST: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Weights for the second CNPJ check digit.
pub const CNPJ_WEIGHTS_SECOND: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

const CPF_WEIGHTS_FIRST: [u32; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];
const CPF_WEIGHTS_SECOND: [u32; 10] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];

/// Compute a modulo-11 check digit over `digits` weighted position by position.
///
/// `digits` and `weights` must have the same length.
pub fn check_digit(digits: &[u8], weights: &[u32]) -> u8 {
    debug_assert_eq!(digits.len(), weights.len());
    let sum: u32 = digits
        .iter()
        .zip(weights)
        .map(|(&d, &w)| u32::from(d) * w)
        .sum();
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        (11 - remainder) as u8
    }
}

fn random_digits<const N: usize>(source: &dyn UniformSource) -> [u8; N] {
    let mut digits = [0u8; N];
    for d in digits.iter_mut() {
        *d = source.int_in_range(0, 9) as u8;
    }
    digits
}

fn parse_digits<const N: usize>(value: &str) -> Option<[u8; N]> {
    let bytes = value.as_bytes();
    if bytes.len() != N || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let mut digits = [0u8; N];
    for (d, b) in digits.iter_mut().zip(bytes) {
        *d = b - b'0';
    }
    Some(digits)
}

fn write_digits(f: &mut fmt::Formatter<'_>, digits: &[u8]) -> fmt::Result {
    for d in digits {
        write!(f, "{}", d)?;
    }
    Ok(())
}

/// A 14-digit CNPJ: 12 base digits followed by 2 check digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cnpj {
    digits: [u8; 14],
}

impl Cnpj {
    /// Build a CNPJ from 8 seed digits, appending the branch code and check digits.
    pub fn from_base(base: &[u8; 8]) -> Self {
        let mut digits = [0u8; 14];
        digits[..8].copy_from_slice(base);
        digits[8..12].copy_from_slice(&CNPJ_BRANCH);
        digits[12] = check_digit(&digits[..12], &CNPJ_WEIGHTS_FIRST);
        digits[13] = check_digit(&digits[..13], &CNPJ_WEIGHTS_SECOND);
        Self { digits }
    }

    /// Generate a CNPJ from random seed digits.
    pub fn random(source: &dyn UniformSource) -> Self {
        Self::from_base(&random_digits::<8>(source))
    }

    /// Check that a 14-digit string carries correct check digits.
    ///
    /// Any branch code is accepted. Formatting characters are not.
    pub fn is_valid(value: &str) -> bool {
        let Some(digits) = parse_digits::<14>(value) else {
            return false;
        };
        digits[12] == check_digit(&digits[..12], &CNPJ_WEIGHTS_FIRST)
            && digits[13] == check_digit(&digits[..13], &CNPJ_WEIGHTS_SECOND)
    }

    pub fn digits(&self) -> &[u8; 14] {
        &self.digits
    }

    /// The two check digits.
    pub fn check_digits(&self) -> (u8, u8) {
        (self.digits[12], self.digits[13])
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_digits(f, &self.digits)
    }
}

/// An 11-digit CPF: 9 base digits followed by 2 check digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cpf {
    digits: [u8; 11],
}

impl Cpf {
    pub fn from_base(base: &[u8; 9]) -> Self {
        let mut digits = [0u8; 11];
        digits[..9].copy_from_slice(base);
        digits[9] = check_digit(&digits[..9], &CPF_WEIGHTS_FIRST);
        digits[10] = check_digit(&digits[..10], &CPF_WEIGHTS_SECOND);
        Self { digits }
    }

    pub fn random(source: &dyn UniformSource) -> Self {
        Self::from_base(&random_digits::<9>(source))
    }

    pub fn is_valid(value: &str) -> bool {
        let Some(digits) = parse_digits::<11>(value) else {
            return false;
        };
        digits[9] == check_digit(&digits[..9], &CPF_WEIGHTS_FIRST)
            && digits[10] == check_digit(&digits[..10], &CPF_WEIGHTS_SECOND)
    }

    pub fn digits(&self) -> &[u8; 11] {
        &self.digits
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_digits(f, &self.digits)
    }
}
