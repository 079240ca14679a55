//! Deterministic content checksums
//!
//! Clients compare these to make sure they loaded identical content.
//! Values stay below [`CHECKSUM_MODULUS`].

use std::collections::{BTreeMap, BTreeSet};

pub const CHECKSUM_MODULUS: u32 = 10_000_000;

/// Content that contributes to a checksum
pub trait CheckSum {
    fn checksum(&self) -> u32;
}

/// Fold `value` into `sum`
pub fn combine<T: CheckSum + ?Sized>(sum: &mut u32, value: &T) {
    *sum = ((*sum as u64 + value.checksum() as u64) % CHECKSUM_MODULUS as u64) as u32;
}

impl CheckSum for str {
    fn checksum(&self) -> u32 {
        self.bytes()
            .fold(0u64, |acc, b| (acc + b as u64 + 128) % CHECKSUM_MODULUS as u64) as u32
    }
}

impl CheckSum for String {
    fn checksum(&self) -> u32 {
        self.as_str().checksum()
    }
}

impl CheckSum for bool {
    fn checksum(&self) -> u32 {
        u32::from(*self)
    }
}

impl CheckSum for u32 {
    fn checksum(&self) -> u32 {
        self % CHECKSUM_MODULUS
    }
}

impl CheckSum for i32 {
    fn checksum(&self) -> u32 {
        self.unsigned_abs() % CHECKSUM_MODULUS
    }
}

impl CheckSum for usize {
    fn checksum(&self) -> u32 {
        (*self % CHECKSUM_MODULUS as usize) as u32
    }
}

impl CheckSum for f64 {
    fn checksum(&self) -> u32 {
        // Three decimal places is enough resolution for content values
        ((self.abs() * 1000.0).round() as u64 % CHECKSUM_MODULUS as u64) as u32
    }
}

impl<T: CheckSum> CheckSum for Option<T> {
    fn checksum(&self) -> u32 {
        match self {
            Some(v) => {
                let mut sum = 1;
                combine(&mut sum, v);
                sum
            }
            None => 0,
        }
    }
}

impl<T: CheckSum> CheckSum for [T] {
    fn checksum(&self) -> u32 {
        let mut sum = 0;
        for item in self {
            combine(&mut sum, item);
        }
        combine(&mut sum, &self.len());
        sum
    }
}

impl<T: CheckSum> CheckSum for Vec<T> {
    fn checksum(&self) -> u32 {
        self.as_slice().checksum()
    }
}

impl<T: CheckSum> CheckSum for BTreeSet<T> {
    fn checksum(&self) -> u32 {
        let mut sum = 0;
        for item in self {
            combine(&mut sum, item);
        }
        combine(&mut sum, &self.len());
        sum
    }
}

impl<K: CheckSum, V: CheckSum> CheckSum for BTreeMap<K, V> {
    fn checksum(&self) -> u32 {
        let mut sum = 0;
        for (k, v) in self {
            combine(&mut sum, k);
            combine(&mut sum, v);
        }
        combine(&mut sum, &self.len());
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_checksum() {
        // 'A' = 65, +128 each
        assert_eq!("A".checksum(), 193);
        assert_eq!("AB".checksum(), 193 + 194);
        assert_eq!("".checksum(), 0);
    }

    #[test]
    fn test_combine_stays_below_modulus() {
        let mut sum = CHECKSUM_MODULUS - 1;
        combine(&mut sum, "A");
        assert!(sum < CHECKSUM_MODULUS);
        assert_eq!(sum, 192);
    }

    #[test]
    fn test_sequence_length_matters() {
        let one = vec!["X".to_string()];
        let two = vec!["X".to_string(), String::new()];
        assert_ne!(one.checksum(), two.checksum());
    }

    #[test]
    fn test_option_distinguishes_none() {
        let none: Option<String> = None;
        assert_ne!(none.checksum(), Some(String::new()).checksum());
    }
}
