// パイプライン全体のエラー型定義
// 各コンポーネントで検出したエラーをSupervisorまで運ぶ

use std::path::{Path, PathBuf};
use thiserror::Error;

/// レインボーテーブル生成のエラー型
#[derive(Error, Debug)]
pub enum RainbowError {
    #[error("ワードリスト読み込みエラー: {} - {source}", path.display())]
    WordlistError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("出力先オープンエラー: {location} - {source}")]
    OutputOpenError {
        location: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("出力書き込みエラー: {location} - {source}")]
    OutputWriteError {
        location: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("出力クローズエラー: {location} - {source}")]
    OutputFinalizeError {
        location: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },

    #[error("チャンネルエラー: {message}")]
    ChannelError { message: String },

    #[error("タスクエラー: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("内部エラー: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl RainbowError {
    /// ワードリスト読み込みエラーの作成
    pub fn wordlist(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::WordlistError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn output_open(location: impl Into<String>, source: anyhow::Error) -> Self {
        Self::OutputOpenError {
            location: location.into(),
            source,
        }
    }

    pub fn output_write(location: impl Into<String>, source: anyhow::Error) -> Self {
        Self::OutputWriteError {
            location: location.into(),
            source,
        }
    }

    pub fn output_finalize(location: impl Into<String>, source: anyhow::Error) -> Self {
        Self::OutputFinalizeError {
            location: location.into(),
            source,
        }
    }

    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// チャンネルエラーの作成
    pub fn channel(message: impl Into<String>) -> Self {
        Self::ChannelError {
            message: message.into(),
        }
    }

    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::TaskError { source }
    }

    pub fn internal(source: anyhow::Error) -> Self {
        Self::InternalError { source }
    }

    /// チャンネル切断は他コンポーネントの停止から派生した二次的エラー
    pub fn is_derived(&self) -> bool {
        matches!(self, Self::ChannelError { .. })
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConfigurationError { .. } => ErrorSeverity::High,
            Self::WordlistError { .. } => ErrorSeverity::High,
            Self::OutputOpenError { .. }
            | Self::OutputWriteError { .. }
            | Self::OutputFinalizeError { .. } => ErrorSeverity::Critical,
            Self::ChannelError { .. } => ErrorSeverity::Medium,
            Self::TaskError { .. } | Self::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// エラーコンテキストを取得
    pub fn context(&self) -> ErrorContext {
        match self {
            Self::WordlistError { path, .. } => ErrorContext::new("read_wordlist")
                .with_resource(path.display().to_string())
                .with_suggestion("ワードリストのパスと読み取り権限を確認してください"),
            Self::OutputOpenError { location, .. } => ErrorContext::new("open_output")
                .with_resource(location.clone())
                .with_suggestion("出力先ディレクトリの書き込み権限を確認してください"),
            Self::OutputWriteError { location, .. } => ErrorContext::new("write_output")
                .with_resource(location.clone())
                .with_suggestion("ディスク容量を確認してください。出力は不完全です"),
            Self::OutputFinalizeError { location, .. } => {
                ErrorContext::new("finalize_output").with_resource(location.clone())
            }
            Self::ConfigurationError { message } => ErrorContext::new("configuration")
                .with_suggestion(format!("設定を確認してください: {message}")),
            _ => ErrorContext::new("pipeline"),
        }
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    /// 出力が壊れている可能性がある
    Critical,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// エラーコンテキスト情報
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// 実行していた操作
    pub operation: String,
    /// 関連するリソース（ファイルパス等）
    pub resource: Option<String>,
    /// エラー解決のための提案
    pub suggestion: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            resource: None,
            suggestion: None,
        }
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// パイプラインの結果型
pub type RainbowResult<T> = std::result::Result<T, RainbowError>;

impl From<tokio::task::JoinError> for RainbowError {
    fn from(error: tokio::task::JoinError) -> Self {
        RainbowError::TaskError { source: error }
    }
}
