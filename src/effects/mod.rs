pub(crate) mod fly;
pub(crate) mod instance;
pub(crate) mod kind;
pub(crate) mod particles;
pub(crate) mod reaction;
pub(crate) mod toast;
pub(crate) mod visual;
