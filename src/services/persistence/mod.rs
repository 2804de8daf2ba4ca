// 出力先の永続化機能
// フラットファイル / SQLite への書き込み、アグリゲーター、検索

pub mod aggregator;
pub mod implementations;
pub mod lookup;
pub mod sqlite;
pub mod target;

// 公開API
pub use aggregator::spawn_output_aggregator;
pub use implementations::{FlatFileDigestPersistence, MemoryDigestPersistence};
pub use lookup::lookup_digest;
pub use sqlite::SqliteDigestPersistence;
pub use target::{OutputKind, OutputTarget};
