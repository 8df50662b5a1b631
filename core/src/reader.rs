//! Abstract reader resolving upload source URIs to raw bytes.
//!
//! The dispatcher never touches the filesystem itself; it asks a
//! [`UriReader`] collaborator for the bytes behind each upload source.
//! [`FsUriReader`] is the default implementation for `file://` URIs.

use std::io;

use async_trait::async_trait;
use reqwest::Url;

/// Resolves an upload source URI to its raw bytes.
#[async_trait]
pub trait UriReader: Send + Sync {
    async fn read_bytes(&self, uri: &Url) -> io::Result<Vec<u8>>;
}

/// Reads `file://` URIs from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsUriReader;

#[async_trait]
impl UriReader for FsUriReader {
    async fn read_bytes(&self, uri: &Url) -> io::Result<Vec<u8>> {
        let path = uri.to_file_path().map_err(|()| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a local file uri: {uri}"),
            )
        })?;
        tokio::fs::read(path).await
    }
}
