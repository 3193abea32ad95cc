//! ``src/fs/file_system.rs``
//! ============================================================================
//! # `FileSystem`: Capability Boundary for All Disk Access
//!
//! The navigation core never touches the disk itself. Listings and the
//! copy/move/delete primitives go through this trait so the event loop can
//! run them on background tasks and tests can substitute doubles.
//!
//! Every call is treated as atomic-or-failed by the caller; partial writes on
//! failure are the implementation's concern.

use async_trait::async_trait;
use std::{
    ffi::OsStr,
    fs::{FileType, Metadata},
    future::Future,
    io::ErrorKind,
    path::{Path, PathBuf},
    pin::Pin,
};
use tokio::fs as TokioFs;
use tracing::{debug, info, instrument, warn};

use crate::error::AppError;
use crate::fs::{dir_scanner, entry::Entry};

type BoxedIo<'a> = Pin<Box<dyn Future<Output = Result<(), AppError>> + Send + 'a>>;

#[async_trait]
pub trait FileSystem: Send + Sync {
    /// List `path`, directories first then files, each group name-ascending.
    async fn list_directory(&self, path: &Path) -> Result<Vec<Entry>, AppError>;

    async fn copy_file(&self, src: &Path, dst: &Path) -> Result<(), AppError>;

    async fn copy_directory(&self, src: &Path, dst: &Path) -> Result<(), AppError>;

    /// Move a file or directory, across devices if needed.
    async fn move_entry(&self, src: &Path, dst: &Path) -> Result<(), AppError>;

    async fn delete_file(&self, path: &Path) -> Result<(), AppError>;

    async fn delete_directory_recursive(&self, path: &Path) -> Result<(), AppError>;
}

/// `FileSystem` backed by the local disk through `tokio::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Recursive directory copy. Existing directories are merged into, but an
    /// existing destination file aborts the copy. Symlinks are recreated, not
    /// followed.
    ///
    /// Callers must have checked `ensure_outside(src, dst)` first: a
    /// destination inside `src` shows up in its own listing and never ends.
    fn copy_tree<'a>(&'a self, src: &'a Path, dst: &'a Path) -> BoxedIo<'a> {
        Box::pin(async move {
            let metadata: Metadata = TokioFs::metadata(src)
                .await
                .map_err(|e| AppError::from_io(src, e))?;

            if !metadata.is_dir() {
                return Err(AppError::NotADirectory(src.to_path_buf()));
            }

            TokioFs::create_dir_all(dst)
                .await
                .map_err(|e| AppError::from_io(dst, e))?;

            let mut read_dir = TokioFs::read_dir(src)
                .await
                .map_err(|e| AppError::from_io(src, e))?;

            while let Some(child) = read_dir
                .next_entry()
                .await
                .map_err(|e| AppError::from_io(src, e))?
            {
                let src_path: PathBuf = child.path();
                let dst_path: PathBuf = dst.join(child.file_name());

                let file_type: FileType = child
                    .file_type()
                    .await
                    .map_err(|e| AppError::from_io(&src_path, e))?;

                if file_type.is_dir() {
                    self.copy_tree(&src_path, &dst_path).await?;
                    continue;
                }

                if TokioFs::try_exists(&dst_path)
                    .await
                    .map_err(|e| AppError::from_io(&dst_path, e))?
                {
                    return Err(AppError::AlreadyExists(dst_path));
                }

                if file_type.is_symlink() {
                    copy_link(&src_path, &dst_path).await?;
                } else {
                    self.copy_file(&src_path, &dst_path).await?;
                }
            }

            Ok(())
        })
    }

    /// Slow path of `move_entry`: copy `src` to `dst`, then remove `src`.
    async fn copy_then_delete(&self, src: &Path, dst: &Path) -> Result<(), AppError> {
        let metadata: Metadata = TokioFs::symlink_metadata(src)
            .await
            .map_err(|e| AppError::from_io(src, e))?;

        if metadata.is_dir() {
            ensure_outside(src, dst).await?;
            self.copy_tree(src, dst).await?;
            self.delete_directory_recursive(src).await
        } else if metadata.is_symlink() {
            copy_link(src, dst).await?;
            self.delete_file(src).await
        } else {
            self.copy_file(src, dst).await?;
            self.delete_file(src).await
        }
    }
}

/// Fail with `DestinationInsideSource` when `dst` resolves to `src` or below it.
async fn ensure_outside(src: &Path, dst: &Path) -> Result<(), AppError> {
    let src_real: PathBuf = TokioFs::canonicalize(src)
        .await
        .map_err(|e| AppError::from_io(src, e))?;
    let dst_real: PathBuf = resolve_lenient(dst).await?;

    if dst_real.starts_with(&src_real) {
        warn!(
            "refusing to copy {} into {}",
            src_real.display(),
            dst_real.display()
        );
        return Err(AppError::DestinationInsideSource {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
        });
    }

    Ok(())
}

/// Canonicalize the longest existing ancestor of `path` and re-append the rest.
async fn resolve_lenient(path: &Path) -> Result<PathBuf, AppError> {
    let mut missing: Vec<&OsStr> = Vec::new();
    let mut ancestor: &Path = path;

    loop {
        match TokioFs::canonicalize(ancestor).await {
            Ok(real) => {
                return Ok(missing
                    .iter()
                    .rev()
                    .fold(real, |acc: PathBuf, name| acc.join(name)));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let (Some(name), Some(parent)) = (ancestor.file_name(), ancestor.parent()) else {
                    return Err(AppError::from_io(path, e));
                };
                missing.push(name);
                ancestor = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
            }
            Err(e) => return Err(AppError::from_io(path, e)),
        }
    }
}

/// Recreate the symlink at `src` as `dst`, pointing at the same target.
#[cfg(unix)]
async fn copy_link(src: &Path, dst: &Path) -> Result<(), AppError> {
    let target: PathBuf = TokioFs::read_link(src)
        .await
        .map_err(|e| AppError::from_io(src, e))?;

    TokioFs::symlink(&target, dst)
        .await
        .map_err(|e| AppError::from_io(dst, e))
}

#[cfg(not(unix))]
async fn copy_link(src: &Path, _dst: &Path) -> Result<(), AppError> {
    warn!("skipping symlink {}", src.display());
    Ok(())
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    #[instrument(level = "debug", skip_all, fields(path = %path.display()))]
    async fn list_directory(&self, path: &Path) -> Result<Vec<Entry>, AppError> {
        dir_scanner::scan_dir(path).await
    }

    #[instrument(level = "debug", skip_all, fields(src = %src.display(), dst = %dst.display()))]
    async fn copy_file(&self, src: &Path, dst: &Path) -> Result<(), AppError> {
        let bytes: u64 = TokioFs::copy(src, dst)
            .await
            .map_err(|e| AppError::from_io(src, e))?;

        debug!(bytes, "copy_file: done");
        Ok(())
    }

    #[instrument(level = "debug", skip_all, fields(src = %src.display(), dst = %dst.display()))]
    async fn copy_directory(&self, src: &Path, dst: &Path) -> Result<(), AppError> {
        ensure_outside(src, dst).await?;
        self.copy_tree(src, dst).await
    }

    #[instrument(level = "debug", skip_all, fields(src = %src.display(), dst = %dst.display()))]
    async fn move_entry(&self, src: &Path, dst: &Path) -> Result<(), AppError> {
        // Rename first; fall back to copy + delete (e.g. across devices)
        let rename_err = match TokioFs::rename(src, dst).await {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        info!("move_entry: rename failed ({rename_err}), falling back to copy + delete");
        self.copy_then_delete(src, dst).await
    }

    #[instrument(level = "debug", skip_all, fields(path = %path.display()))]
    async fn delete_file(&self, path: &Path) -> Result<(), AppError> {
        TokioFs::remove_file(path)
            .await
            .map_err(|e| AppError::from_io(path, e))
    }

    #[instrument(level = "debug", skip_all, fields(path = %path.display()))]
    async fn delete_directory_recursive(&self, path: &Path) -> Result<(), AppError> {
        TokioFs::remove_dir_all(path).await.map_err(|e| {
            warn!("delete_directory_recursive: {e}");
            AppError::from_io(path, e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_directory() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        TokioFs::create_dir_all(root.join("src/nested")).await.unwrap();
        TokioFs::write(root.join("src/one.txt"), b"one").await.unwrap();
        TokioFs::write(root.join("src/nested/two.txt"), b"two").await.unwrap();
        TokioFs::write(root.join("file.txt"), b"content").await.unwrap();

        temp_dir
    }

    #[tokio::test]
    async fn copy_file_duplicates_content() {
        let temp_dir = create_test_directory().await;
        let root = temp_dir.path();
        let fs = LocalFileSystem::new();

        fs.copy_file(&root.join("file.txt"), &root.join("copy.txt"))
            .await
            .unwrap();

        let copied = TokioFs::read(root.join("copy.txt")).await.unwrap();
        assert_eq!(copied, b"content");
        assert!(root.join("file.txt").exists());
    }

    #[tokio::test]
    async fn copy_file_missing_source_fails() {
        let temp_dir = TempDir::new().unwrap();
        let fs = LocalFileSystem::new();

        let err = fs
            .copy_file(&temp_dir.path().join("ghost"), &temp_dir.path().join("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn copy_directory_is_recursive() {
        let temp_dir = create_test_directory().await;
        let root = temp_dir.path();
        let fs = LocalFileSystem::new();

        fs.copy_directory(&root.join("src"), &root.join("dst"))
            .await
            .unwrap();

        assert_eq!(TokioFs::read(root.join("dst/one.txt")).await.unwrap(), b"one");
        assert_eq!(
            TokioFs::read(root.join("dst/nested/two.txt")).await.unwrap(),
            b"two"
        );
    }

    #[tokio::test]
    async fn copy_directory_refuses_to_overwrite_files() {
        let temp_dir = create_test_directory().await;
        let root = temp_dir.path();
        let fs = LocalFileSystem::new();

        TokioFs::create_dir(root.join("dst")).await.unwrap();
        TokioFs::write(root.join("dst/one.txt"), b"keep").await.unwrap();

        let err = fs
            .copy_directory(&root.join("src"), &root.join("dst"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::AlreadyExists(_)));
        assert_eq!(TokioFs::read(root.join("dst/one.txt")).await.unwrap(), b"keep");
    }

    #[tokio::test]
    async fn copy_directory_rejects_plain_file() {
        let temp_dir = create_test_directory().await;
        let root = temp_dir.path();
        let fs = LocalFileSystem::new();

        let err = fs
            .copy_directory(&root.join("file.txt"), &root.join("dst"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotADirectory(_)));
    }

    #[tokio::test]
    async fn copy_directory_into_own_subtree_is_refused() {
        let temp_dir = create_test_directory().await;
        let root = temp_dir.path();
        let fs = LocalFileSystem::new();

        for dst in [root.join("src/nested/src"), root.join("src")] {
            let err = fs
                .copy_directory(&root.join("src"), &dst)
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::DestinationInsideSource { .. }));
        }
        assert!(!root.join("src/nested/src").exists());
    }

    #[tokio::test]
    async fn copy_directory_sees_through_dot_dot_destinations() {
        let temp_dir = create_test_directory().await;
        let root = temp_dir.path();
        let fs = LocalFileSystem::new();

        let sneaky = root.join("src/nested/../nested/copy");
        let err = fs.copy_directory(&root.join("src"), &sneaky).await.unwrap_err();
        assert!(matches!(err, AppError::DestinationInsideSource { .. }));
    }

    #[tokio::test]
    async fn move_entry_into_own_subtree_is_refused() {
        let temp_dir = create_test_directory().await;
        let root = temp_dir.path();
        let fs = LocalFileSystem::new();

        let err = fs
            .move_entry(&root.join("src"), &root.join("src/nested/src"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DestinationInsideSource { .. }));
        assert!(root.join("src/one.txt").exists());
        assert!(!root.join("src/nested/src").exists());
    }

    #[tokio::test]
    async fn copy_then_delete_relocates_directory_and_file() {
        let temp_dir = create_test_directory().await;
        let root = temp_dir.path();
        let fs = LocalFileSystem::new();

        fs.copy_then_delete(&root.join("src"), &root.join("elsewhere"))
            .await
            .unwrap();
        assert!(!root.join("src").exists());
        assert_eq!(
            TokioFs::read(root.join("elsewhere/nested/two.txt")).await.unwrap(),
            b"two"
        );

        fs.copy_then_delete(&root.join("file.txt"), &root.join("elsewhere/file.txt"))
            .await
            .unwrap();
        assert!(!root.join("file.txt").exists());
        assert_eq!(
            TokioFs::read(root.join("elsewhere/file.txt")).await.unwrap(),
            b"content"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn copy_directory_recreates_symlinks() {
        let temp_dir = create_test_directory().await;
        let root = temp_dir.path();
        let fs = LocalFileSystem::new();

        TokioFs::symlink("nested", root.join("src/dir_link")).await.unwrap();
        TokioFs::symlink("one.txt", root.join("src/file_link")).await.unwrap();

        fs.copy_directory(&root.join("src"), &root.join("dst"))
            .await
            .unwrap();

        for (link, target) in [("dir_link", "nested"), ("file_link", "one.txt")] {
            let copied = root.join("dst").join(link);
            let metadata = TokioFs::symlink_metadata(&copied).await.unwrap();
            assert!(metadata.file_type().is_symlink());
            assert_eq!(TokioFs::read_link(&copied).await.unwrap(), PathBuf::from(target));
        }
        assert_eq!(TokioFs::read(root.join("dst/dir_link/two.txt")).await.unwrap(), b"two");
    }

    #[tokio::test]
    async fn move_entry_relocates_file_and_directory() {
        let temp_dir = create_test_directory().await;
        let root = temp_dir.path();
        let fs = LocalFileSystem::new();

        fs.move_entry(&root.join("file.txt"), &root.join("moved.txt"))
            .await
            .unwrap();
        assert!(!root.join("file.txt").exists());
        assert!(root.join("moved.txt").exists());

        fs.move_entry(&root.join("src"), &root.join("moved_dir"))
            .await
            .unwrap();
        assert!(!root.join("src").exists());
        assert!(root.join("moved_dir/nested/two.txt").exists());
    }

    #[tokio::test]
    async fn delete_file_and_directory() {
        let temp_dir = create_test_directory().await;
        let root = temp_dir.path();
        let fs = LocalFileSystem::new();

        fs.delete_file(&root.join("file.txt")).await.unwrap();
        assert!(!root.join("file.txt").exists());

        fs.delete_directory_recursive(&root.join("src")).await.unwrap();
        assert!(!root.join("src").exists());

        let err = fs.delete_file(&root.join("file.txt")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
