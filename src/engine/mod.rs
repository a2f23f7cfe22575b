pub(crate) mod veg_patch;
