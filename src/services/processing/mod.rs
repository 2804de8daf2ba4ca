// ハッシュ処理機能
// 作業単位の単語列をダイジェストに変換する

pub mod worker;

// 公開API
pub use worker::hash_work_unit;
