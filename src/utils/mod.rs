#[cfg_attr(not(feature = "web"), allow(dead_code))]
pub mod debounce;
pub mod format;
pub mod validate;
