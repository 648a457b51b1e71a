//! Judge0 を使った CodeExecutor 実装
//!
//! `POST {base}/submissions?base64_encoded=false&wait=true` を 1 回だけ呼び出し、
//! レスポンスを `ExecutionResult` に正規化します。リトライはしません。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{CodeExecutor, ExecutionError, ExecutionResult, Language, Submission};

/// Judge0 への接続設定
#[derive(Debug, Clone)]
pub struct Judge0Config {
    pub base_url: String,
    /// RapidAPI のキー（自前ホストの Judge0 では不要）
    pub api_key: Option<String>,
    pub api_host: String,
    pub timeout: Duration,
}

/// Judge0 を使った CodeExecutor 実装
#[derive(Debug, Clone)]
pub struct Judge0Executor {
    client: Client,
    config: Judge0Config,
}

impl Judge0Executor {
    pub fn new(config: Judge0Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Judge0 の language_id
    pub fn language_id(language: Language) -> u32 {
        match language {
            Language::JavaScript => 63,
            Language::Python => 71,
            Language::Java => 62,
            Language::Cpp => 54,
            Language::C => 50,
        }
    }

    fn submissions_url(&self) -> String {
        format!("{}/submissions", self.config.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct SubmissionRequest<'a> {
    source_code: &'a str,
    language_id: u32,
    stdin: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct SubmissionResponse {
    stdout: Option<String>,
    stderr: Option<String>,
    compile_output: Option<String>,
    status: Option<SubmissionStatus>,
    time: Option<String>,
    memory: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SubmissionStatus {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl From<SubmissionResponse> for ExecutionResult {
    fn from(response: SubmissionResponse) -> Self {
        Self {
            output: non_empty(response.stdout).unwrap_or_default(),
            error: non_empty(response.stderr)
                .or_else(|| non_empty(response.compile_output))
                .unwrap_or_default(),
            status: response
                .status
                .and_then(|status| non_empty(status.description))
                .unwrap_or_else(|| "Unknown".to_string()),
            time: response.time,
            memory: response.memory,
        }
    }
}

#[async_trait]
impl CodeExecutor for Judge0Executor {
    async fn submit(&self, submission: Submission) -> Result<ExecutionResult, ExecutionError> {
        let body = SubmissionRequest {
            source_code: &submission.source_code,
            language_id: Self::language_id(submission.language),
            stdin: &submission.stdin,
        };

        let mut request = self
            .client
            .post(self.submissions_url())
            .query(&[("base64_encoded", "false"), ("wait", "true")])
            .header("X-RapidAPI-Host", &self.config.api_host)
            .json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.header("X-RapidAPI-Key", key);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Judge0 request failed: {}", e);
            ExecutionError::Backend(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| status.to_string());
            tracing::error!("Judge0 returned {}: {}", status, message);
            return Err(ExecutionError::Backend(message));
        }

        let payload: SubmissionResponse = response.json().await.map_err(|e| {
            tracing::error!("Judge0 returned a malformed response: {}", e);
            ExecutionError::Backend(format!("malformed response: {e}"))
        })?;
        tracing::debug!(
            "Judge0 finished with status {:?}",
            payload.status.as_ref().and_then(|s| s.description.as_deref())
        );

        Ok(payload.into())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        Json, Router,
        extract::Query,
        http::{HeaderMap, StatusCode},
        routing::post,
    };
    use serde_json::{Value, json};

    use super::*;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - レスポンスの正規化（stdout/stderr/compile_output/status の欠落）
    // - リクエスト形式（クエリ、ヘッダー、ボディ）
    // - 失敗時のエラーメッセージ（エラーボディ、タイムアウト）
    //
    // ローカルに Judge0 を模したサーバーを立てて検証する。
    // ========================================

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn executor(base_url: String, timeout: Duration) -> Judge0Executor {
        Judge0Executor::new(Judge0Config {
            base_url,
            api_key: Some("test-key".to_string()),
            api_host: "judge0.test".to_string(),
            timeout,
        })
        .unwrap()
    }

    fn submission() -> Submission {
        Submission {
            source_code: "print(input())".to_string(),
            language: Language::Python,
            stdin: "hello".to_string(),
        }
    }

    #[test]
    fn test_normalize_missing_fields() {
        // テスト項目: stdout/stderr/status が欠けたレスポンスは空文字列と Unknown に正規化される
        // given (前提条件):
        let response = SubmissionResponse::default();

        // when (操作):
        let result: ExecutionResult = response.into();

        // then (期待する結果):
        assert_eq!(result.output, "");
        assert_eq!(result.error, "");
        assert_eq!(result.status, "Unknown");
        assert_eq!(result.time, None);
        assert_eq!(result.memory, None);
    }

    #[test]
    fn test_normalize_prefers_stderr_then_compile_output() {
        // テスト項目: stderr が空のときはコンパイル出力がエラーとして使われる
        // given (前提条件):
        let response = SubmissionResponse {
            stdout: None,
            stderr: Some(String::new()),
            compile_output: Some("main.c:1: error".to_string()),
            status: Some(SubmissionStatus {
                description: Some("Compilation Error".to_string()),
            }),
            time: None,
            memory: None,
        };

        // when (操作):
        let result: ExecutionResult = response.into();

        // then (期待する結果):
        assert_eq!(result.error, "main.c:1: error");
        assert_eq!(result.status, "Compilation Error");
    }

    #[test]
    fn test_language_ids() {
        // テスト項目: 各言語が Judge0 の language_id に対応付けられる
        // given (前提条件):

        // when (操作):
        let ids: Vec<u32> = Language::ALL
            .into_iter()
            .map(Judge0Executor::language_id)
            .collect();

        // then (期待する結果):
        assert_eq!(ids, vec![63, 71, 62, 54, 50]);
    }

    #[tokio::test]
    async fn test_submit_sends_expected_request() {
        // テスト項目: 正しいクエリ・ヘッダー・ボディで送信され、結果が正規化される
        // given (前提条件):
        let router = Router::new().route(
            "/submissions",
            post(
                |Query(query): Query<HashMap<String, String>>,
                 headers: HeaderMap,
                 Json(body): Json<Value>| async move {
                    assert_eq!(query.get("base64_encoded").map(String::as_str), Some("false"));
                    assert_eq!(query.get("wait").map(String::as_str), Some("true"));
                    assert_eq!(headers["x-rapidapi-key"], "test-key");
                    assert_eq!(headers["x-rapidapi-host"], "judge0.test");
                    assert_eq!(body["language_id"], 71);
                    assert_eq!(body["stdin"], "hello");
                    Json(json!({
                        "stdout": "hello\n",
                        "stderr": null,
                        "compile_output": null,
                        "status": {"id": 3, "description": "Accepted"},
                        "time": "0.012",
                        "memory": 3120
                    }))
                },
            ),
        );
        let base_url = spawn_stub(router).await;
        let executor = executor(format!("{base_url}/"), Duration::from_secs(5));

        // when (操作):
        let result = executor.submit(submission()).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(ExecutionResult {
                output: "hello\n".to_string(),
                error: String::new(),
                status: "Accepted".to_string(),
                time: Some("0.012".to_string()),
                memory: Some(3120),
            })
        );
    }

    #[tokio::test]
    async fn test_submit_surfaces_upstream_error_message() {
        // テスト項目: エラーステータスのときはボディの error がメッセージになる
        // given (前提条件):
        let router = Router::new().route(
            "/submissions",
            post(|| async {
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({"error": "quota exhausted"})),
                )
            }),
        );
        let executor = executor(spawn_stub(router).await, Duration::from_secs(5));

        // when (操作):
        let result = executor.submit(submission()).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ExecutionError::Backend("quota exhausted".to_string()))
        );
    }

    #[tokio::test]
    async fn test_submit_times_out() {
        // テスト項目: タイムアウトするとバックエンドエラーになる
        // given (前提条件):
        let router = Router::new().route(
            "/submissions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({}))
            }),
        );
        let executor = executor(spawn_stub(router).await, Duration::from_millis(100));

        // when (操作):
        let result = executor.submit(submission()).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ExecutionError::Backend(_))));
    }
}
