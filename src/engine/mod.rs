// エンジン層 - 並列処理とオーケストレーション
// サービス層を組み合わせてパイプライン全体を構成する

pub mod api;
pub mod distributor;
pub mod supervisor;
pub mod workers;

// 公開API
pub use api::{generate_rainbow_table, RunRequest};
pub use distributor::{distribute_wordlists, DistributionStats};
pub use supervisor::{Supervisor, SupervisorState};
pub use workers::{spawn_hash_workers, spawn_single_worker};
