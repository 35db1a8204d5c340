pub(crate) mod enter;
pub(crate) mod intro;
pub(crate) mod parallax;
pub(crate) mod pulse;
pub(crate) mod reveal;
