pub(crate) mod decode;
pub(crate) mod sprite;
pub(crate) mod store;
pub(crate) mod text;
