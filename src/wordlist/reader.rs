// ワードリストを1行ずつ生バイトで読む
// 文字コードの解釈はしない（1バイト1文字として扱う）

use crate::core::{RainbowError, RainbowResult, Word};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// 行末の `\n`（直前の `\r` も含む）だけを取り除く
pub fn strip_line_terminator(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
}

/// 1ファイル分の行リーダー
///
/// 行末は `\n`・`\r\n`・単独の `\r` のいずれも区切りとして扱う。
pub struct WordlistReader {
    path: PathBuf,
    reader: BufReader<File>,
    /// 直前の行が `\r` で終わった（続く `\n` は同じ区切りの一部）
    pending_lf: bool,
}

impl WordlistReader {
    pub async fn open(path: impl AsRef<Path>) -> RainbowResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)
            .await
            .map_err(|e| RainbowError::wordlist(&path, e))?;

        Ok(Self {
            path,
            reader: BufReader::with_capacity(READ_BUFFER_SIZE, file),
            pending_lf: false,
        })
    }

    /// 次の単語。EOFで `None`
    pub async fn next_word(&mut self) -> RainbowResult<Option<Word>> {
        let mut line = Vec::new();
        let mut started = false;

        loop {
            let (consumed, terminator, appended) = {
                let available = self
                    .reader
                    .fill_buf()
                    .await
                    .map_err(|e| RainbowError::wordlist(&self.path, e))?;

                if available.is_empty() {
                    return Ok(started.then(|| Word::new(line)));
                }

                if self.pending_lf {
                    self.pending_lf = false;
                    (usize::from(available[0] == b'\n'), None, false)
                } else {
                    match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                        Some(index) => {
                            line.extend_from_slice(&available[..index]);
                            (index + 1, Some(available[index]), false)
                        }
                        None => {
                            line.extend_from_slice(available);
                            (available.len(), None, true)
                        }
                    }
                }
            };

            self.reader.consume(consumed);

            if let Some(byte) = terminator {
                self.pending_lf = byte == b'\r';
                return Ok(Some(Word::new(line)));
            }
            started |= appended;
        }
    }
}

/// 全ワードリストの行数合計（進捗表示用）
pub async fn count_words(paths: &[PathBuf]) -> RainbowResult<u64> {
    let mut total = 0u64;
    for path in paths {
        let mut reader = WordlistReader::open(path).await?;
        let mut count = 0u64;
        while reader.next_word().await?.is_some() {
            count += 1;
        }
        tracing::debug!(path = %path.display(), lines = count, "counted wordlist lines");
        total += count;
    }
    Ok(total)
}
