//! Configuration: runtime types, config file location, XML loading and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{CONFIG_ENV, default_config_path, env_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{config_file_location, load_config, load_config_from_xml_path};
