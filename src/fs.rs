/// MTime info gathered for a file.  This also models "file is absent".
/// It's not using an Option<> just because it makes the code using it easier
/// to follow.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MTime {
    Missing,
    Stamp(Stamp),
}

/// A modification time, seconds and nanoseconds since the epoch.
/// Ordering compares seconds first, then nanoseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stamp {
    pub secs: i64,
    pub nanos: u32,
}

impl MTime {
    pub fn stamp(secs: i64, nanos: u32) -> Self {
        MTime::Stamp(Stamp { secs, nanos })
    }

    pub fn exists(&self) -> bool {
        matches!(self, MTime::Stamp(_))
    }

    /// True iff self is strictly later than other.  A missing file is
    /// never newer than anything.
    pub fn newer_than(&self, other: &MTime) -> bool {
        match (self, other) {
            (MTime::Stamp(a), MTime::Stamp(b)) => a > b,
            (MTime::Stamp(_), MTime::Missing) => true,
            (MTime::Missing, _) => false,
        }
    }
}

pub trait FileSystem {
    /// stat() an on-disk path, producing its MTime.
    fn stat(&self, path: &str) -> std::io::Result<MTime>;
}

#[derive(Default)]
pub struct RealFileSystem {}
impl RealFileSystem {
    pub fn new() -> Self {
        RealFileSystem {}
    }
}

#[cfg(unix)]
fn mtime(meta: &std::fs::Metadata) -> std::io::Result<MTime> {
    use std::os::unix::fs::MetadataExt;
    Ok(MTime::stamp(meta.mtime(), meta.mtime_nsec() as u32))
}

#[cfg(not(unix))]
fn mtime(meta: &std::fs::Metadata) -> std::io::Result<MTime> {
    let since = meta
        .modified()?
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    Ok(MTime::stamp(since.as_secs() as i64, since.subsec_nanos()))
}

impl FileSystem for RealFileSystem {
    fn stat(&self, path: &str) -> std::io::Result<MTime> {
        match std::fs::metadata(path) {
            Ok(meta) => mtime(&meta),
            Err(err) => {
                if err.kind() == std::io::ErrorKind::NotFound {
                    Ok(MTime::Missing)
                } else {
                    Err(err)
                }
            }
        }
    }
}
