pub(crate) mod layout;
pub(crate) mod slots;
pub(crate) mod composer;
pub(crate) mod overlay;
