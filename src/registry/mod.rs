pub(crate) mod context;
pub(crate) mod overlay;
pub(crate) mod targets;
