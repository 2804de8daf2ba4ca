// コアレイヤー - 基盤となるトレイト、型、エラー定義
// パイプラインの全コンポーネントから参照される基本的な抽象化を提供

pub mod error;
pub mod traits;
pub mod types;

// 公開API
pub use error::{ErrorContext, ErrorSeverity, RainbowError, RainbowResult};
pub use traits::{
    DigestPersistence, MockDigestPersistence, MockPipelineConfig, MockProgressReporter,
    PipelineConfig, ProgressReporter,
};
pub use types::{
    DigestResult, ResultBatch, ResultMessage, RunSummary, Word, WorkMessage, WorkUnit,
};
