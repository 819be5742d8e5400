//! Backlog project link
//!
//! Per-job link to a Backlog space/project, the credentials used to reach it,
//! and the link action a build server shows on the job page.

pub mod action;
pub mod descriptor;
pub mod error;
pub mod job;
pub mod messages;
pub mod models;
pub mod registry;
pub mod secret;
pub mod storage;
pub mod validation;

pub use action::{LinkAction, LinkActionFactory};
pub use descriptor::ProjectLinkDescriptor;
pub use error::{Error, Result};
pub use job::{Job, JobCapabilities, JobKind, JobRecord, ParentKind};
pub use messages::{Locale, MessageKey};
pub use models::{Config, ConfigOverrides, ProjectLinkConfig};
pub use registry::{Extension, ExtensionRegistry};
pub use secret::Secret;
pub use validation::{ConfigValidator, FormValidation, ValidationKind};
