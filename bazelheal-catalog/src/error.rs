use bazelheal_workspace::QueryError;
use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("read archive {path}: {source}")]
    ArchiveIo {
        path: Utf8PathBuf,
        source: std::io::Error,
    },

    #[error("open archive {path}: {source}")]
    ArchiveFormat {
        path: Utf8PathBuf,
        source: zip::result::ZipError,
    },

    #[error("list {dir}: {source}")]
    DirList {
        dir: Utf8PathBuf,
        source: std::io::Error,
    },

    /// A materialized dependency directory must hold exactly one jar
    /// (ignoring the `-sources` classifier); ambiguity is not tolerated.
    #[error("want exactly one jar in {dir} but got {candidates:?}")]
    AmbiguousJarDir {
        dir: Utf8PathBuf,
        candidates: Vec<String>,
    },

    #[error("walk source tree {root}: {source}")]
    SourceWalk {
        root: Utf8PathBuf,
        source: walkdir::Error,
    },

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("cache {path}: {source}")]
    CacheIo {
        path: Utf8PathBuf,
        source: std::io::Error,
    },

    #[error("decode cache {path}: {source}")]
    CacheDecode {
        path: Utf8PathBuf,
        source: bincode::Error,
    },

    #[error("encode cache: {source}")]
    CacheEncode { source: bincode::Error },
}
