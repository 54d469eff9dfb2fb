use super::traits::ActionCacheStore;
use crate::cache::ActionKey;
use anyhow::{Context, Result};
use async_trait::async_trait;
use prost::Message;
use re_grpc_proto::build::bazel::remote::execution::v2::ActionResult;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use tokio_util::sync::CancellationToken;

pub struct FileSystemActionCacheStore {
    root_dir: PathBuf,
}

impl FileSystemActionCacheStore {
    pub fn new(root_dir: PathBuf) -> Self {
        Self { root_dir }
    }

    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root_dir)
            .await
            .with_context(|| format!("Failed to create action cache dir {:?}", self.root_dir))?;
        Ok(())
    }

    fn cache_path(&self, key: &ActionKey) -> PathBuf {
        let hash = key.hash();

        self.root_dir
            .join(&hash[0..2])
            .join(&hash[2..4])
            .join(format!("{}_{}.actionresult", hash, key.size_bytes()))
    }

    async fn ensure_parent_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
        Ok(())
    }
}

#[async_trait]
impl ActionCacheStore for FileSystemActionCacheStore {
    async fn get_action_result(&self, key: &ActionKey) -> Result<Option<ActionResult>> {
        let path = self.cache_path(key);

        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read action result {:?}", path))
            }
        };

        let result = ActionResult::decode(&data[..])
            .with_context(|| format!("Corrupt action result at {:?}", path))?;

        Ok(Some(result))
    }

    async fn put_action_result(&self, key: &ActionKey, result: &ActionResult) -> Result<()> {
        let path = self.cache_path(key);
        self.ensure_parent_dir(&path).await?;

        let buf = result.encode_to_vec();

        // Dropping this future abandons the write; the blocking writer stops at
        // the next chunk and its temp file is removed.
        let abandoned = CancellationToken::new();
        let _abandon_on_drop = abandoned.clone().drop_guard();

        tokio::task::spawn_blocking(move || write_atomically(&path, &buf, &abandoned))
            .await
            .context("Action result writer panicked")?
    }

    async fn touch_action_result(&self, key: &ActionKey) -> Result<()> {
        let path = self.cache_path(key);

        tokio::task::spawn_blocking(move || {
            let now = filetime::FileTime::now();
            match filetime::set_file_times(&path, now, now) {
                Err(e) if e.kind() != ErrorKind::NotFound => {
                    Err(e).with_context(|| format!("Failed to touch {:?}", path))
                }
                _ => Ok(()),
            }
        })
        .await
        .context("Action result touch panicked")?
    }
}

const WRITE_CHUNK_SIZE: usize = 1 << 20;

/// Writes `buf` to a temp file next to `path` and renames it into place. The
/// temp file is deleted on every path that does not end in the rename.
fn write_atomically(path: &Path, buf: &[u8], abandoned: &CancellationToken) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("No parent directory for {:?}", path))?;

    let mut temp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in {:?}", parent))?;

    for chunk in buf.chunks(WRITE_CHUNK_SIZE) {
        if abandoned.is_cancelled() {
            anyhow::bail!("Write of {:?} abandoned", path);
        }
        temp.write_all(chunk)
            .with_context(|| format!("Failed to write {:?}", temp.path()))?;
    }

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to publish {:?}", path))?;

    Ok(())
}
