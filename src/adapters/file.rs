use crate::adapters::records::{decode_json, decode_toml};
use crate::domain::model::Listing;
use crate::domain::ports::ListingProvider;
use crate::utils::error::{ListingError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Toml,
}

/// Reads listings from a JSON or TOML file. The file is re-read on every
/// `list_all`, so edits show up on the next search.
#[derive(Debug, Clone)]
pub struct FileListings {
    path: PathBuf,
    format: FileFormat,
    name: String,
}

impl FileListings {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => FileFormat::Json,
            Some("toml") => FileFormat::Toml,
            _ => {
                return Err(ListingError::InvalidConfigValueError {
                    field: "source.path".to_string(),
                    value: path.display().to_string(),
                    reason: "Listing files must end in .json or .toml".to_string(),
                })
            }
        };

        Ok(Self {
            name: path.display().to_string(),
            path,
            format,
        })
    }
}

#[async_trait]
impl ListingProvider for FileListings {
    async fn list_all(&self) -> Result<Vec<Listing>> {
        tracing::debug!("Reading listings from {}", self.name);
        let content = tokio::fs::read_to_string(&self.path).await?;

        match self.format {
            FileFormat::Json => decode_json(serde_json::from_str(&content)?, &self.name),
            FileFormat::Toml => decode_toml(&content, &self.name),
        }
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unknown_extension() {
        assert!(FileListings::new("listings.yaml").is_err());
        assert!(FileListings::new("listings.json").is_ok());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let provider = FileListings::new("/definitely/not/here/listings.json").unwrap();
        let err = provider.list_all().await.unwrap_err();
        assert!(matches!(err, ListingError::IoError(_)));
    }
}
