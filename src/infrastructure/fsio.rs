//! 原子文件读写
//!
//! 槽文件与数据文件共用的底层操作。写入先落到同目录的临时文件再
//! rename 覆盖，读方不会观察到写了一半的内容（同一文件系统内
//! rename 是原子替换）。

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// 原子写入：临时文件 + rename
pub async fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let tmp = tmp_path(path);
    fs::write(&tmp, contents).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

/// 读取并去首尾空白；文件缺失或内容为空返回 None
pub async fn read_nonempty(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("slot.txt");

        write_atomic(&path, "hello").await.unwrap();
        assert_eq!(read_nonempty(&path).await.unwrap().as_deref(), Some("hello"));

        // 覆盖写
        write_atomic(&path, "world").await.unwrap();
        assert_eq!(read_nonempty(&path).await.unwrap().as_deref(), Some("world"));
    }

    #[tokio::test]
    async fn test_missing_and_empty_read_as_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("slot.txt");

        assert_eq!(read_nonempty(&path).await.unwrap(), None);

        write_atomic(&path, "").await.unwrap();
        assert_eq!(read_nonempty(&path).await.unwrap(), None);

        write_atomic(&path, "  \n ").await.unwrap();
        assert_eq!(read_nonempty(&path).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a/b/slot.txt");

        write_atomic(&path, "x").await.unwrap();
        assert_eq!(read_nonempty(&path).await.unwrap().as_deref(), Some("x"));
    }
}
