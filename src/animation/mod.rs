pub(crate) mod ease;
pub(crate) mod estimate;
pub(crate) mod evaluator;
pub(crate) mod interpolate;
pub(crate) mod kind;
