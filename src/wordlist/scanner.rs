use crate::core::{RainbowError, RainbowResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct WordlistScanner;

impl WordlistScanner {
    /// フォルダ直下の `.txt` をパス順で返す（再帰しない）
    ///
    /// `excluded` に含まれるファイル（生成中のテーブル自身など）は除外する。
    pub fn scan_folder(directory: &Path, excluded: &[PathBuf]) -> RainbowResult<Vec<PathBuf>> {
        let excluded: Vec<PathBuf> = excluded.iter().map(|p| Self::resolve(p)).collect();
        let mut file_paths = Vec::new();

        for entry in WalkDir::new(directory).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                RainbowError::wordlist(directory, source)
            })?;

            if entry.file_type().is_file() {
                if let Some(extension) = entry.path().extension() {
                    let ext = extension.to_string_lossy().to_lowercase();
                    if Self::is_wordlist_extension(&ext) {
                        if excluded.contains(&Self::resolve(entry.path())) {
                            tracing::debug!(path = %entry.path().display(), "skipping output table");
                            continue;
                        }
                        file_paths.push(entry.path().to_path_buf());
                    }
                }
            }
        }

        if file_paths.is_empty() {
            return Err(RainbowError::configuration(format!(
                "ワードリストが見つかりません: {}",
                directory.display()
            )));
        }

        file_paths.sort();
        Ok(file_paths)
    }

    /// 比較用の正規化パス（存在しなければ絶対パス化のみ）
    fn resolve(path: &Path) -> PathBuf {
        path.canonicalize()
            .or_else(|_| std::path::absolute(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }

    fn is_wordlist_extension(extension: &str) -> bool {
        extension == "txt"
    }
}
