// Worker - 単一作業単位のハッシュ処理

use crate::core::{DigestResult, ResultBatch, WorkUnit};
use crate::digest::{digest_hex, DigestAlgorithm};

/// 作業単位内の全単語をハッシュ化する
///
/// CPUバウンドな同期処理。呼び出し側で `spawn_blocking` に載せる。
/// 結果の順序は入力の順序と一致する。
pub fn hash_work_unit(algorithm: DigestAlgorithm, unit: WorkUnit) -> ResultBatch {
    let results = unit
        .words
        .into_iter()
        .map(|word| DigestResult {
            digest: digest_hex(algorithm, word.as_bytes()),
            word,
        })
        .collect();

    ResultBatch {
        sequence: unit.sequence,
        results,
    }
}
