use crate::domain::model::{BuildReport, BuildResult, CollectionRecord};
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    /// Last-modified time of `path`, in nanoseconds since the Unix epoch.
    fn modified_ns(&self, path: &str) -> Result<u128>;
}

pub trait ConfigProvider: Send + Sync {
    fn csv_path(&self) -> &str;
    fn output_path(&self) -> &str;
}

pub trait Pipeline: Send + Sync {
    fn extract(&self) -> Result<Vec<CollectionRecord>>;
    fn transform(&self, records: Vec<CollectionRecord>) -> Result<BuildResult>;
    fn load(&self, result: BuildResult) -> Result<BuildReport>;
}
