//! Elements of a finite field of prime order.
//!
//! A [`FieldElement`] carries its residue and the prime modulus of the
//! field it belongs to. Two elements are in the same field exactly when
//! their moduli are equal, and every binary operation checks that before
//! touching the numbers. All operations are pure: they take references and
//! hand back a fresh element (or an error), never mutating an operand.

use std::fmt;

use num_bigint::{BigInt, BigUint, RandBigInt, Sign};
use num_traits::{One, Zero};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::prime::{is_prime, PrimalityConfig};

/// Everything that can go wrong constructing or combining field elements.
///
/// All of these mean the caller handed us something invalid; none are
/// transient, and nothing here is retried or papered over internally.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The value handed to the constructor is not in `[0, modulus)`.
    #[error("value {value} is not in the range [0, {modulus})")]
    InvalidElement { value: BigInt, modulus: BigUint },

    /// The modulus is not a positive prime (or failed the configured
    /// primality test).
    #[error("modulus {modulus} is not a positive prime")]
    InvalidModulus { modulus: BigUint },

    /// A binary operation was attempted across two different fields.
    #[error("field mismatch: one operand has modulus {lhs}, the other {rhs}")]
    FieldMismatch { lhs: BigUint, rhs: BigUint },

    /// Division by, or inversion of, the zero element.
    #[error("division by the zero element")]
    DivisionByZero,
}

/// One value of a finite field of prime order.
///
/// Immutable once constructed; `0 <= value < modulus` and a prime modulus
/// hold for every live element, because the only ways to obtain one are
/// the validated constructors and the arithmetic below.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct FieldElement {
    value: BigUint,
    modulus: BigUint,
}

impl FieldElement {
    /// Builds an element of the field of order `modulus`.
    ///
    /// The value is validated, not reduced: callers who want `-3 mod 13`
    /// must reduce before constructing. A negative or out-of-range value
    /// fails with [`FieldError::InvalidElement`]; a non-prime modulus
    /// fails with [`FieldError::InvalidModulus`]. Primality is checked
    /// with the default [`PrimalityConfig`].
    pub fn new(value: BigInt, modulus: BigUint) -> Result<FieldElement, FieldError> {
        Self::new_with_config(value, modulus, &PrimalityConfig::default())
    }

    /// Like [`FieldElement::new`] but with an explicit primality
    /// confidence setting for the modulus check.
    pub fn new_with_config(
        value: BigInt,
        modulus: BigUint,
        cfg: &PrimalityConfig,
    ) -> Result<FieldElement, FieldError> {
        check_modulus(&modulus, cfg)?;
        match value.to_biguint() {
            Some(v) if v < modulus => Ok(Self::from_reduced(v, modulus)),
            _ => Err(FieldError::InvalidElement { value, modulus }),
        }
    }

    /// Convenience constructor for word-sized values.
    pub fn from_u64(value: u64, modulus: u64) -> Result<FieldElement, FieldError> {
        Self::new(BigInt::from(value), BigUint::from(modulus))
    }

    /// The additive identity of the field of order `modulus`.
    pub fn zero(modulus: BigUint) -> Result<FieldElement, FieldError> {
        Self::new(BigInt::zero(), modulus)
    }

    /// The multiplicative identity of the field of order `modulus`.
    pub fn one(modulus: BigUint) -> Result<FieldElement, FieldError> {
        Self::new(BigInt::one(), modulus)
    }

    /// Samples a uniform element of the field of order `modulus`.
    pub fn random<R: Rng>(modulus: &BigUint, rng: &mut R) -> Result<FieldElement, FieldError> {
        check_modulus(modulus, &PrimalityConfig::default())?;
        let value = rng.gen_biguint_below(modulus);
        Ok(Self::from_reduced(value, modulus.clone()))
    }

    // Results of arithmetic land here: the operands already proved the
    // modulus prime, and the value is reduced by construction.
    fn from_reduced(value: BigUint, modulus: BigUint) -> FieldElement {
        debug_assert!(value < modulus);
        FieldElement { value, modulus }
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// True iff both elements belong to the field of the same modulus.
    pub fn same_field(&self, other: &FieldElement) -> bool {
        self.modulus == other.modulus
    }

    fn check_same_field(&self, other: &FieldElement) -> Result<(), FieldError> {
        if self.same_field(other) {
            Ok(())
        } else {
            Err(FieldError::FieldMismatch {
                lhs: self.modulus.clone(),
                rhs: other.modulus.clone(),
            })
        }
    }

    /// `(self + other) mod p`.
    pub fn add(&self, other: &FieldElement) -> Result<FieldElement, FieldError> {
        self.check_same_field(other)?;
        let value = (&self.value + &other.value) % &self.modulus;
        Ok(Self::from_reduced(value, self.modulus.clone()))
    }

    /// `(self - other) mod p`.
    ///
    /// Computed as `(self + p - other) mod p`: the representation is
    /// unsigned, so the subtraction must never pass through a negative
    /// intermediate.
    pub fn sub(&self, other: &FieldElement) -> Result<FieldElement, FieldError> {
        self.check_same_field(other)?;
        let value = ((&self.value + &self.modulus) - &other.value) % &self.modulus;
        Ok(Self::from_reduced(value, self.modulus.clone()))
    }

    /// `(self * other) mod p`.
    pub fn mul(&self, other: &FieldElement) -> Result<FieldElement, FieldError> {
        self.check_same_field(other)?;
        let value = (&self.value * &other.value) % &self.modulus;
        Ok(Self::from_reduced(value, self.modulus.clone()))
    }

    /// `self * other^-1 mod p`.
    ///
    /// Fails with [`FieldError::DivisionByZero`] when `other` is the zero
    /// element.
    pub fn div(&self, other: &FieldElement) -> Result<FieldElement, FieldError> {
        self.check_same_field(other)?;
        let inverse = other.inv()?;
        let value = (&self.value * &inverse.value) % &self.modulus;
        Ok(Self::from_reduced(value, self.modulus.clone()))
    }

    /// The multiplicative inverse `self^-1 mod p`.
    ///
    /// By Fermat's little theorem the inverse of nonzero `a` is
    /// `a^(p-2) mod p`; `modpow` reduces at every squaring step, so the
    /// unreduced power is never materialized. The zero element has no
    /// inverse and fails with [`FieldError::DivisionByZero`].
    pub fn inv(&self) -> Result<FieldElement, FieldError> {
        if self.value.is_zero() {
            return Err(FieldError::DivisionByZero);
        }
        let exponent = &self.modulus - 2u32;
        let value = self.value.modpow(&exponent, &self.modulus);
        Ok(Self::from_reduced(value, self.modulus.clone()))
    }

    /// The additive inverse `-self mod p`. Infallible; negating zero
    /// yields zero.
    pub fn neg(&self) -> FieldElement {
        if self.value.is_zero() {
            self.clone()
        } else {
            Self::from_reduced(&self.modulus - &self.value, self.modulus.clone())
        }
    }

    /// `self^exponent mod p` for an exponent of either sign.
    ///
    /// For nonzero `self`, Fermat's little theorem gives `a^(p-1) = 1`,
    /// so the exponent is first reduced modulo `p - 1`; negative
    /// exponents normalize into `[0, p-1)` by adding a multiple of
    /// `p - 1`. That keeps the real exponent small no matter what the
    /// caller supplies.
    ///
    /// Zero is outside the theorem and handled directly: `0^0 = 1` (the
    /// empty product), `0^k = 0` for positive `k`, and a negative
    /// exponent of zero fails with [`FieldError::DivisionByZero`] since
    /// it would invert zero.
    pub fn pow(&self, exponent: &BigInt) -> Result<FieldElement, FieldError> {
        if self.value.is_zero() {
            let value = match exponent.sign() {
                Sign::Minus => return Err(FieldError::DivisionByZero),
                Sign::NoSign => BigUint::one(),
                Sign::Plus => BigUint::zero(),
            };
            return Ok(Self::from_reduced(value, self.modulus.clone()));
        }

        let group_order = BigInt::from(&self.modulus - 1u32);
        let mut reduced = exponent % &group_order;
        if reduced.sign() == Sign::Minus {
            reduced += &group_order;
        }
        let reduced = reduced
            .to_biguint()
            .expect("exponent is non-negative after normalization");
        let value = self.value.modpow(&reduced, &self.modulus);
        Ok(Self::from_reduced(value, self.modulus.clone()))
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FieldElement_{}({})", self.modulus, self.value)
    }
}

// Deserialization routes through the validated constructor so an invalid
// element can never arrive over the wire.
impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D>(deserializer: D) -> Result<FieldElement, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename = "FieldElement")]
        struct Wire {
            value: BigUint,
            modulus: BigUint,
        }

        let wire = Wire::deserialize(deserializer)?;
        FieldElement::new(BigInt::from(wire.value), wire.modulus)
            .map_err(serde::de::Error::custom)
    }
}

//
// Operator sugar over the named methods. The contract (including the
// error cases) lives on the methods; these just forward.
//

impl<'a, 'b> std::ops::Add<&'b FieldElement> for &'a FieldElement {
    type Output = Result<FieldElement, FieldError>;

    fn add(self, rhs: &'b FieldElement) -> Self::Output {
        FieldElement::add(self, rhs)
    }
}

impl std::ops::Add for FieldElement {
    type Output = Result<FieldElement, FieldError>;

    fn add(self, rhs: FieldElement) -> Self::Output {
        FieldElement::add(&self, &rhs)
    }
}

impl<'a, 'b> std::ops::Sub<&'b FieldElement> for &'a FieldElement {
    type Output = Result<FieldElement, FieldError>;

    fn sub(self, rhs: &'b FieldElement) -> Self::Output {
        FieldElement::sub(self, rhs)
    }
}

impl std::ops::Sub for FieldElement {
    type Output = Result<FieldElement, FieldError>;

    fn sub(self, rhs: FieldElement) -> Self::Output {
        FieldElement::sub(&self, &rhs)
    }
}

impl<'a, 'b> std::ops::Mul<&'b FieldElement> for &'a FieldElement {
    type Output = Result<FieldElement, FieldError>;

    fn mul(self, rhs: &'b FieldElement) -> Self::Output {
        FieldElement::mul(self, rhs)
    }
}

impl std::ops::Mul for FieldElement {
    type Output = Result<FieldElement, FieldError>;

    fn mul(self, rhs: FieldElement) -> Self::Output {
        FieldElement::mul(&self, &rhs)
    }
}

impl<'a, 'b> std::ops::Div<&'b FieldElement> for &'a FieldElement {
    type Output = Result<FieldElement, FieldError>;

    fn div(self, rhs: &'b FieldElement) -> Self::Output {
        FieldElement::div(self, rhs)
    }
}

impl std::ops::Div for FieldElement {
    type Output = Result<FieldElement, FieldError>;

    fn div(self, rhs: FieldElement) -> Self::Output {
        FieldElement::div(&self, &rhs)
    }
}

impl<'a> std::ops::Neg for &'a FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        FieldElement::neg(self)
    }
}

impl std::ops::Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        FieldElement::neg(&self)
    }
}

fn check_modulus(modulus: &BigUint, cfg: &PrimalityConfig) -> Result<(), FieldError> {
    if is_prime(modulus, cfg) {
        Ok(())
    } else {
        Err(FieldError::InvalidModulus {
            modulus: modulus.clone(),
        })
    }
}
