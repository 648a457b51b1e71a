//! Logging setup utilities for the Codecast server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the server library, this crate, the binary and
/// `tower_http` request tracing. The log level can be overridden using the
/// `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "codecast-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use codecast_shared::logger::setup_logger;
///
/// setup_logger("codecast-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn default_filter(binary_name: &str, level: &str) -> String {
    let mut targets = vec![
        "codecast_server".to_string(),
        env!("CARGO_PKG_NAME").replace('-', "_"),
    ];
    let binary = binary_name.replace('-', "_");
    if !targets.contains(&binary) {
        targets.push(binary);
    }
    targets.push("tower_http".to_string());

    targets
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_lists_server_binary_once() {
        // テスト項目: サーバーのバイナリ名はライブラリと同じターゲットなので重複しない
        // given (前提条件):
        let binary_name = "codecast-server";

        // when (操作):
        let filter = default_filter(binary_name, "info");

        // then (期待する結果):
        assert_eq!(filter, "codecast_server=info,codecast_shared=info,tower_http=info");
    }

    #[test]
    fn test_default_filter_adds_other_binary() {
        // テスト項目: 別名のバイナリはターゲットとして追加される
        // given (前提条件):
        let binary_name = "codecast-loadgen";

        // when (操作):
        let filter = default_filter(binary_name, "debug");

        // then (期待する結果):
        assert_eq!(
            filter,
            "codecast_server=debug,codecast_shared=debug,codecast_loadgen=debug,tower_http=debug"
        );
    }
}
