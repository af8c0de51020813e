//! Arithmetic in finite fields of prime order.
//!
//! This crate provides [`FieldElement`], a value together with the prime
//! modulus of the field it lives in, and the modular arithmetic needed by
//! the elliptic-curve and signature layers built on top of it. Every
//! element is produced through a validated constructor, so a live element
//! always satisfies `0 <= value < modulus` with a prime modulus.

pub mod field;
pub mod moduli;
pub mod prime;

pub use crate::field::{FieldElement, FieldError};
pub use crate::prime::PrimalityConfig;
