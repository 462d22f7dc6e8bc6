use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    fn modified_ns(&self, path: &str) -> Result<u128> {
        let full_path = Path::new(&self.base_path).join(path);
        let modified = fs::metadata(full_path)?.modified()?;
        let since_epoch =
            modified
                .duration_since(UNIX_EPOCH)
                .map_err(|e| EtlError::ProcessingError {
                    message: format!("Source timestamp predates the Unix epoch: {}", e),
                })?;
        Ok(since_epoch.as_nanos())
    }
}
