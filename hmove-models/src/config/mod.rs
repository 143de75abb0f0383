//! Settings loading shared by every crate of the workspace
//!
//! Each crate declares its own `*Settings` structure deriving `Deserialize`
//! and loads it through [`build_hmove_settings`]. The resulting settings are
//! then converted into the runtime configuration the crate works with.

mod hmove_settings;

pub use hmove_settings::{
    build_hmove_settings, CONFIG_OVERRIDE_PATH_ENV, CONFIG_PATH_ENV, DEFAULT_CONFIG_OVERRIDE_PATH,
    DEFAULT_CONFIG_PATH,
};
