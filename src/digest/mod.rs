//! ダイジェスト関数
//!
//! `(アルゴリズム, 単語)` から小文字16進のダイジェスト文字列を計算する純粋関数。
//! 呼び出しごとにハッシュプリミティブを新規生成するため、並列に呼んでも
//! 状態が混ざることはない。

use clap::ValueEnum;
use digest::Digest;
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use std::fmt;
use std::str::FromStr;

/// サポートするダイジェストアルゴリズム
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum DigestAlgorithm {
    #[default]
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    pub const ALL: [DigestAlgorithm; 5] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// ダイジェスト長（バイト）
    pub const fn digest_len(&self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|alg| alg.name() == lower)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "未サポートのアルゴリズム: {s}. 利用可能: md5, sha1, sha256, sha384, sha512"
                )
            })
    }
}

fn hex_digest<D: Digest>(data: &[u8]) -> String {
    hex::encode(D::digest(data))
}

/// 単語のダイジェストを小文字16進で返す
pub fn digest_hex(algorithm: DigestAlgorithm, data: &[u8]) -> String {
    match algorithm {
        DigestAlgorithm::Md5 => hex_digest::<Md5>(data),
        DigestAlgorithm::Sha1 => hex_digest::<Sha1>(data),
        DigestAlgorithm::Sha256 => hex_digest::<Sha256>(data),
        DigestAlgorithm::Sha384 => hex_digest::<Sha384>(data),
        DigestAlgorithm::Sha512 => hex_digest::<Sha512>(data),
    }
}
