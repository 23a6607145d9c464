/// Evaluation results and stored scalars.
///
/// Defines `Value`, the universal currency of expression evaluation, and
/// `Scalar`, the tagged form in which variables and table elements are
/// stored.
pub mod core;
