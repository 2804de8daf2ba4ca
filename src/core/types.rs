// パイプラインを流れるデータ型定義

use serde::Serialize;
use std::fmt;

/// ワードリストの1行（行末の改行を除いた生バイト列）
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word(Vec<u8>);

impl Word {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Latin-1として文字列化（1バイト = 1文字、失敗しない）
    pub fn to_latin1_string(&self) -> String {
        self.0.iter().map(|&b| b as char).collect()
    }
}

impl From<&str> for Word {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for Word {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({:?})", self.to_latin1_string())
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_latin1_string())
    }
}

/// ワーカーへ配信される作業単位（チャンク）
///
/// `sequence` は配信順の通し番号。出力順序の保証には使わない（ログ用）。
#[derive(Debug, Clone, PartialEq)]
pub struct WorkUnit {
    pub sequence: u64,
    pub words: Vec<Word>,
}

impl WorkUnit {
    pub fn new(sequence: u64, words: Vec<Word>) -> Self {
        Self { sequence, words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// ダイジェストと元の単語のペア
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DigestResult {
    pub digest: String,
    pub word: Word,
}

impl DigestResult {
    /// フラットファイル1行分（`<digest>:<word>`、改行なし）
    pub fn to_line_bytes(&self) -> Vec<u8> {
        let mut line = Vec::with_capacity(self.digest.len() + 1 + self.word.len());
        line.extend_from_slice(self.digest.as_bytes());
        line.push(b':');
        line.extend_from_slice(self.word.as_bytes());
        line
    }
}

/// 1つのWorkUnitに1対1で対応する結果バッチ
#[derive(Debug, Clone, PartialEq)]
pub struct ResultBatch {
    pub sequence: u64,
    pub results: Vec<DigestResult>,
}

impl ResultBatch {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// 作業キューのメッセージ。終了シグナルは型で区別する
#[derive(Debug, Clone, PartialEq)]
pub enum WorkMessage {
    Work(WorkUnit),
    Shutdown,
}

/// 結果キューのメッセージ
#[derive(Debug, Clone, PartialEq)]
pub enum ResultMessage {
    Batch(ResultBatch),
    Shutdown,
}

/// 1回の実行全体のサマリー
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub workers: usize,
    pub work_units: u64,
    pub words_read: u64,
    pub rows_written: u64,
    pub elapsed_ms: u64,
    pub output_location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_latin1_decoding() {
        let word = Word::new(vec![b'c', b'a', b'f', 0xE9]);

        assert_eq!(word.to_latin1_string(), "café");
        assert_eq!(word.len(), 4);
    }

    #[test]
    fn test_word_from_str() {
        let word = Word::from("pass");
        assert_eq!(word.as_bytes(), b"pass");
        assert!(!word.is_empty());
        assert!(Word::from("").is_empty());
    }

    #[test]
    fn test_digest_result_line_bytes() {
        let result = DigestResult {
            digest: "abcd".to_string(),
            word: Word::new(vec![b'x', 0xFF]),
        };

        assert_eq!(result.to_line_bytes(), vec![b'a', b'b', b'c', b'd', b':', b'x', 0xFF]);
    }

    #[test]
    fn test_word_with_colon_is_kept_whole() {
        let result = DigestResult {
            digest: "00".to_string(),
            word: Word::from("a:b"),
        };

        assert_eq!(result.to_line_bytes(), b"00:a:b".to_vec());
    }

    #[test]
    fn test_messages_are_distinct_from_data() {
        let empty_unit = WorkMessage::Work(WorkUnit::new(0, vec![]));
        assert_ne!(empty_unit, WorkMessage::Shutdown);

        let empty_batch = ResultMessage::Batch(ResultBatch {
            sequence: 0,
            results: vec![],
        });
        assert_ne!(empty_batch, ResultMessage::Shutdown);
    }

    #[test]
    fn test_run_summary_serializes() {
        let summary = RunSummary {
            workers: 3,
            work_units: 2,
            words_read: 10,
            rows_written: 10,
            elapsed_ms: 5,
            output_location: "rainbow.txt".to_string(),
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["workers"], 3);
        assert_eq!(json["rows_written"], 10);
        assert_eq!(json["output_location"], "rainbow.txt");
    }
}
