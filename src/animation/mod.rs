pub(crate) mod ease;
pub(crate) mod engine;
pub(crate) mod props;
pub(crate) mod tween;
