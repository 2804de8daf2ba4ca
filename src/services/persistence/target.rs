// 出力先の選択（フラットファイル / データベース）

use super::{FlatFileDigestPersistence, SqliteDigestPersistence};
use crate::core::DigestPersistence;
use std::ffi::OsString;
use std::path::PathBuf;

/// 出力先の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    FlatFile,
    Database,
}

impl OutputKind {
    pub fn from_use_database(use_database: bool) -> Self {
        if use_database {
            Self::Database
        } else {
            Self::FlatFile
        }
    }

    pub const fn extension(&self) -> &'static str {
        match self {
            Self::FlatFile => "txt",
            Self::Database => "db",
        }
    }
}

/// 拡張子なしのベース名と種類で表す出力先
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    base: PathBuf,
    kind: OutputKind,
}

impl OutputTarget {
    pub fn new(base: impl Into<PathBuf>, kind: OutputKind) -> Self {
        Self {
            base: base.into(),
            kind,
        }
    }

    pub fn flat_file(base: impl Into<PathBuf>) -> Self {
        Self::new(base, OutputKind::FlatFile)
    }

    pub fn database(base: impl Into<PathBuf>) -> Self {
        Self::new(base, OutputKind::Database)
    }

    pub fn kind(&self) -> OutputKind {
        self.kind
    }

    /// ベース名に `.txt` / `.db` を付けた実際のパス
    pub fn path(&self) -> PathBuf {
        let mut name = OsString::from(self.base.as_os_str());
        name.push(".");
        name.push(self.kind.extension());
        PathBuf::from(name)
    }

    /// 未オープンの出力先を生成（オープンはアグリゲーターが行う）
    pub fn create_persistence(&self) -> Box<dyn DigestPersistence> {
        match self.kind {
            OutputKind::FlatFile => Box::new(FlatFileDigestPersistence::new(self.path())),
            OutputKind::Database => Box::new(SqliteDigestPersistence::new(self.path())),
        }
    }
}
