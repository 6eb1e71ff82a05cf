//! Speech Pipeline Utilities
//!
//! Project paths, logger setup, object persistence, pretrained model lookup
//! and layer freezing used around the speech model.

mod error;
pub mod freeze;
pub mod logging;
pub mod paths;
pub mod persist;
pub mod pretrained;

pub use error::UtilsError;
pub use freeze::{freeze, LayeredModel, WeightsManifest};
pub use logging::{create_logger, LoggerConfig};
pub use paths::{chdir, project_root, WorkDir};
pub use pretrained::{load, resolve_weights, with_resolved_weights, ModelBundle, ModelLoader};
