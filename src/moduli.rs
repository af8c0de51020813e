//! Prime moduli that come up over and over.

use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::Num;

lazy_static! {
    /// Coordinate-field prime of the secp256k1 curve: 2^256 - 2^32 - 977.
    pub static ref SECP256K1_P: BigUint = BigUint::from_str_radix(
        "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
        16,
    )
    .unwrap();

    /// Largest prime below 2^63. Useful when a word-sized field is enough.
    pub static ref P_63: BigUint = BigUint::from(9_223_372_036_854_775_783u64);
}
