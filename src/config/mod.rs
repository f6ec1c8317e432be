// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for cmlint.
//!
//! This module handles finding, parsing and merging configuration files,
//! including `extends` chains over built-in presets and other files.

pub mod default;
mod loader;
mod schema;

pub use loader::{
    find_config_file, find_config_file_from, load_config, load_config_from, merge_configs,
    parse_config, parse_config_file, resolve_preset, ConfigFormat,
};
pub use schema::*;
