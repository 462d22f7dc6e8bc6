pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};
pub use config::BuildConfig;

pub use core::{etl::EtlEngine, pipeline::CollectionPipeline};
pub use domain::model::{BuildReport, CollectionMeta, CollectionRecord};
pub use utils::error::{EtlError, Result};
