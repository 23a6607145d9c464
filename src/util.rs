/// Numeric conversion and formatting helpers.
///
/// This module provides the conversions the interpreter needs between the
/// `f64` it computes with and the integers it counts with, plus the canonical
/// decimal rendering used by `WRITE` and string coercion.
///
/// All fallible conversions return a `Result`, which is `Ok` only if the
/// conversion is lossless and valid.
pub mod num;
