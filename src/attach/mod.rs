pub(crate) mod bootstrap;
pub(crate) mod boundary;
pub(crate) mod factory;
