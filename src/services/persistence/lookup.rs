// 生成済みテーブルからダイジェストに対応する単語を引く

use super::sqlite::connect;
use super::target::{OutputKind, OutputTarget};
use crate::core::{RainbowError, RainbowResult, Word};
use crate::wordlist::strip_line_terminator;
use anyhow::Context;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

const SELECT_WORD_SQL: &str = "SELECT word FROM rainbow WHERE digest = ? LIMIT 1";

/// 最初に見つかった単語を返す。見つからなければ `None`
pub async fn lookup_digest(target: &OutputTarget, digest: &str) -> RainbowResult<Option<String>> {
    let digest = digest.trim().to_ascii_lowercase();
    let path = target.path();
    let location = path.display().to_string();

    if !path.exists() {
        return Err(RainbowError::output_open(
            location,
            anyhow::anyhow!("テーブルが存在しません"),
        ));
    }

    match target.kind() {
        OutputKind::Database => {
            let mut connection = connect(&path, false)
                .await
                .map_err(|e| RainbowError::output_open(&location, e))?;
            let word = sqlx::query_scalar::<_, String>(SELECT_WORD_SQL)
                .bind(digest.as_str())
                .fetch_optional(&mut connection)
                .await
                .context("検索クエリエラー")
                .map_err(|e| RainbowError::output_open(&location, e))?;
            Ok(word)
        }
        OutputKind::FlatFile => {
            let file = File::open(&path)
                .await
                .map_err(|e| RainbowError::output_open(&location, e.into()))?;
            let mut reader = BufReader::new(file);
            let mut prefix = digest.into_bytes();
            prefix.push(b':');

            let mut line = Vec::new();
            loop {
                line.clear();
                let read = reader
                    .read_until(b'\n', &mut line)
                    .await
                    .map_err(|e| RainbowError::output_open(&location, e.into()))?;
                if read == 0 {
                    return Ok(None);
                }
                strip_line_terminator(&mut line);
                if let Some(word) = line.strip_prefix(prefix.as_slice()) {
                    return Ok(Some(Word::new(word).to_latin1_string()));
                }
            }
        }
    }
}
