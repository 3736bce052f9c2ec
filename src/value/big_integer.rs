use crate::Error;
use num_bigint::BigUint;
use serde::de::Visitor;
use serde::{Serialize, Serializer};
use std::convert::TryFrom;
use std::fmt;

/// A decoded Smile `BigInteger` value.
///
/// The decoder reconstructs the magnitude only; no sign is applied.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BigInteger(BigUint);

impl BigInteger {
    pub(crate) const STRUCT_NAME: &'static str = "\0SmileBigInteger";
    pub(crate) const FIELD_NAME: &'static str = "\0SmileBigIntegerValue";

    /// Creates a `BigInteger` from an unsigned big integer.
    #[inline]
    pub fn new(value: BigUint) -> Self {
        BigInteger(value)
    }

    /// Returns a reference to the underlying unsigned big integer.
    #[inline]
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Consumes the `BigInteger`, returning the underlying unsigned big integer.
    #[inline]
    pub fn into_biguint(self) -> BigUint {
        self.0
    }

    /// Returns the big-endian bytes of the value, without leading zeros.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        self.0.to_bytes_be()
    }

    /// Returns the value as a `u64` if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        u64::try_from(&self.0).ok()
    }

    /// Returns the value as a `u128` if it fits.
    pub fn to_u128(&self) -> Option<u128> {
        u128::try_from(&self.0).ok()
    }

    pub(crate) fn visit<'de, V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        if let Some(v) = self.to_u64() {
            return visitor.visit_u64(v);
        }
        if let Some(v) = self.to_u128() {
            return visitor.visit_u128(v);
        }
        visitor.visit_string(self.0.to_string())
    }
}

impl From<BigUint> for BigInteger {
    fn from(value: BigUint) -> Self {
        BigInteger(value)
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for BigInteger {
    /// Serializes as a `u64` or `u128` when the value fits, and as a decimal string otherwise.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if let Some(v) = self.to_u64() {
            return serializer.serialize_u64(v);
        }
        if let Some(v) = self.to_u128() {
            return serializer.serialize_u128(v);
        }
        serializer.collect_str(&self.0)
    }
}
