// CLI層 - コマンドライン引数の定義と処理
// ユーザーインターフェースとアプリケーションロジックの橋渡し

pub mod args;
pub mod commands;

// 公開API
pub use args::*;
pub use commands::*;

use crate::core::RainbowError;
use std::fmt::Write;

/// ログ出力の初期化（RUST_LOG が設定されていればそちらを優先）
pub fn init_tracing(debug: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            tracing_subscriber::EnvFilter::new("debug,sqlx=warn")
        } else {
            tracing_subscriber::EnvFilter::new("info,sqlx=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// 致命的エラーの表示文字列（エラー本文はここでのみ出力する）
pub fn render_failure(error: &anyhow::Error) -> String {
    let mut rendered = format!("❌ エラー: {error}\n");

    if let Some(rainbow_error) = error.downcast_ref::<RainbowError>() {
        let context = rainbow_error.context();
        let _ = writeln!(rendered, "   重要度: {}", rainbow_error.severity().as_str());
        if let Some(resource) = context.resource {
            let _ = writeln!(rendered, "   対象: {resource}");
        }
        if let Some(suggestion) = context.suggestion {
            let _ = writeln!(rendered, "💡 {suggestion}");
        }
    }

    rendered
}
