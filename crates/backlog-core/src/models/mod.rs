pub mod config;
pub mod property;

pub use config::{Config, ConfigOverrides};
pub use property::{normalize_url, ProjectLinkConfig, PROJECTS_SEGMENT};
