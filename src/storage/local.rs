use super::{ObjectMeta, ObjectStore, StoreError};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Filesystem-backed store: object `bucket/key` lives at `<root>/<bucket>/<key>`.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn bucket_dir(&self, bucket: &str) -> Result<PathBuf, StoreError> {
        check_relative(bucket)?;
        Ok(self.root.join(bucket))
    }
}

// Keys must stay inside the bucket directory.
fn check_relative(key: &str) -> Result<(), StoreError> {
    let path = Path::new(key);
    let ok = !key.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

impl ObjectStore for LocalObjectStore {
    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        check_relative(key)?;
        let path = self.bucket_dir(bucket)?.join(key);

        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
            _ => StoreError::Io(e),
        })
    }

    fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectMeta>, StoreError> {
        let dir = self.bucket_dir(bucket)?;
        let mut out = Vec::new();
        if dir.is_dir() {
            walk(&dir, &dir, prefix, &mut out)?;
        }
        out.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(out)
    }
}

fn walk(base: &Path, dir: &Path, prefix: &str, out: &mut Vec<ObjectMeta>) -> Result<(), StoreError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let meta = entry.metadata()?;

        if meta.is_dir() {
            walk(base, &path, prefix, out)?;
            continue;
        }

        let Ok(rel) = path.strip_prefix(base) else {
            continue;
        };
        let key = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if key.starts_with(prefix) {
            let last_modified: DateTime<Utc> = meta.modified()?.into();
            out.push(ObjectMeta { key, last_modified });
        }
    }
    Ok(())
}
