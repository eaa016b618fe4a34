//! Local Filesystem Document Store
//!
//! Implements [`DocumentPort`] by writing uploads into a directory served as
//! static content. Stored names are prefixed with a fresh UUID so two uploads
//! called `timesheet.pdf` never overwrite each other, and the returned
//! reference is the public path, e.g. `/uploads/0190c1..._timesheet.pdf`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{DomainPort, PortError};

use crate::document::{Attachment, DocumentPolicy, DocumentRef};
use crate::ports::DocumentPort;

const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(30);

/// Filesystem-backed document store
#[derive(Debug, Clone)]
pub struct LocalDocumentStore {
    root: PathBuf,
    public_prefix: String,
    policy: DocumentPolicy,
    io_timeout: Duration,
}

impl LocalDocumentStore {
    /// Creates a store writing into `root` and handing out references under `public_prefix`
    ///
    /// The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>, policy: DocumentPolicy) -> Self {
        let prefix: String = public_prefix.into();
        Self {
            root: root.into(),
            public_prefix: prefix.trim_end_matches('/').to_string(),
            policy,
            io_timeout: DEFAULT_IO_TIMEOUT,
        }
    }

    pub fn with_io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout = timeout;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a reference back to a file under the root
    ///
    /// References that do not start with the public prefix, or that try to
    /// leave the root directory, resolve to `NotFound`.
    fn resolve(&self, reference: &DocumentRef) -> Result<PathBuf, PortError> {
        let name = reference
            .as_str()
            .strip_prefix(&self.public_prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| !name.is_empty() && !name.contains('/') && !name.contains(".."))
            .ok_or_else(|| PortError::not_found("Document", reference))?;
        Ok(self.root.join(name))
    }

    async fn with_timeout<T>(
        &self,
        operation: &str,
        future: impl std::future::Future<Output = std::io::Result<T>>,
    ) -> Result<std::io::Result<T>, PortError> {
        tokio::time::timeout(self.io_timeout, future)
            .await
            .map_err(|_| PortError::Timeout {
                operation: operation.to_string(),
                duration_ms: self.io_timeout.as_millis() as u64,
            })
    }
}

impl DomainPort for LocalDocumentStore {}

#[async_trait]
impl DocumentPort for LocalDocumentStore {
    #[instrument(skip(self, attachment), fields(file_name = %attachment.file_name, size = attachment.size()))]
    async fn store(&self, attachment: &Attachment) -> Result<DocumentRef, PortError> {
        self.policy
            .check(attachment)
            .map_err(|e| PortError::validation_field(e.to_string(), "document"))?;
        let safe_name = attachment
            .safe_file_name()
            .map_err(|e| PortError::validation_field(e.to_string(), "document"))?;

        self.with_timeout("create_upload_dir", fs::create_dir_all(&self.root))
            .await?
            .map_err(|e| PortError::internal_with_source("Failed to create upload directory", e))?;

        let stored_name = format!("{}_{}", Uuid::now_v7().simple(), safe_name);
        let path = self.root.join(&stored_name);
        self.with_timeout("write_document", fs::write(&path, &attachment.bytes))
            .await?
            .map_err(|e| PortError::internal_with_source("Failed to write document", e))?;

        debug!(path = %path.display(), "Document written");
        Ok(DocumentRef::new(format!("{}/{}", self.public_prefix, stored_name)))
    }

    #[instrument(skip(self), fields(reference = %reference))]
    async fn retrieve(&self, reference: &DocumentRef) -> Result<Vec<u8>, PortError> {
        let path = self.resolve(reference)?;
        match self.with_timeout("read_document", fs::read(&path)).await? {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PortError::not_found("Document", reference))
            }
            Err(e) => Err(PortError::internal_with_source("Failed to read document", e)),
        }
    }

    #[instrument(skip(self), fields(reference = %reference))]
    async fn remove(&self, reference: &DocumentRef) -> Result<(), PortError> {
        let path = self.resolve(reference)?;
        match self.with_timeout("remove_document", fs::remove_file(&path)).await? {
            Ok(()) => {
                debug!(path = %path.display(), "Document removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PortError::not_found("Document", reference))
            }
            Err(e) => Err(PortError::internal_with_source("Failed to remove document", e)),
        }
    }
}
