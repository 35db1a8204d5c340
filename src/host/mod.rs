pub(crate) mod document;
pub(crate) mod events;
pub(crate) mod stage;
pub(crate) mod timers;
