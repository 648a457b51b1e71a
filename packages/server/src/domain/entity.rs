//! Entities.

use serde::Serialize;

use super::{
    event::RoomEvent,
    value_object::{ConnectionId, DisplayName, Language, RoomId},
};

const DEFAULT_CODE: &str = "// Default starter code\nconsole.log(\"Hello World!\");";
const DEFAULT_LANGUAGE: &str = "javascript";

/// Authoritative shared state of one room.
///
/// Every field is replaced wholesale; the last write wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomState {
    pub code: String,
    /// Free-form: clients may select a language the backend does not support.
    pub language: String,
    pub input: String,
}

impl Default for RoomState {
    fn default() -> Self {
        Self {
            code: DEFAULT_CODE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            input: String::new(),
        }
    }
}

/// A single-field replacement of a [`RoomState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomStateChange {
    Code(String),
    Language(String),
    Input(String),
}

impl RoomStateChange {
    /// Apply the change and return the event announcing it to other members.
    pub fn apply(self, state: &mut RoomState) -> RoomEvent {
        match self {
            RoomStateChange::Code(code) => {
                state.code.clone_from(&code);
                RoomEvent::CodeChanged { code }
            }
            RoomStateChange::Language(language) => {
                state.language.clone_from(&language);
                RoomEvent::LanguageChanged { language }
            }
            RoomStateChange::Input(input) => {
                state.input.clone_from(&input);
                RoomEvent::InputChanged { input }
            }
        }
    }
}

/// A connection currently joined to a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub connection_id: ConnectionId,
    pub display_name: DisplayName,
}

impl Member {
    pub fn new(connection_id: ConnectionId, display_name: DisplayName) -> Self {
        Self {
            connection_id,
            display_name,
        }
    }
}

/// Read model of a room: its state and current members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub state: RoomState,
    pub members: Vec<Member>,
}

/// Raw execution request as received from a client.
///
/// `language` is validated by the coordinator, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub code: String,
    pub language: String,
    pub input: String,
}

/// A validated request ready for the execution backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub source_code: String,
    pub language: Language,
    pub stdin: String,
}

/// Normalized execution outcome shared with the room.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionResult {
    pub output: String,
    /// stderr, or the compiler output when stderr is empty.
    pub error: String,
    pub status: String,
    /// Wall time in seconds, as reported by the backend.
    pub time: Option<String>,
    /// Peak memory in kilobytes, as reported by the backend.
    pub memory: Option<u64>,
}

impl ExecutionResult {
    /// Result reported to a room when an execution could not complete.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            output: String::new(),
            error: message.into(),
            status: "Error".to_string(),
            time: None,
            memory: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_room_state_has_starter_code() {
        // テスト項目: デフォルトの RoomState はスターターコードと JavaScript を持つ
        // given (前提条件):

        // when (操作):
        let state = RoomState::default();

        // then (期待する結果):
        assert!(state.code.contains("Hello World!"));
        assert_eq!(state.language, "javascript");
        assert_eq!(state.input, "");
    }

    #[test]
    fn test_apply_code_change_replaces_only_code() {
        // テスト項目: コード変更はコードのみを置き換え、対応するイベントを返す
        // given (前提条件):
        let mut state = RoomState::default();
        let before = state.clone();

        // when (操作):
        let event = RoomStateChange::Code("print(1)".to_string()).apply(&mut state);

        // then (期待する結果):
        assert_eq!(state.code, "print(1)");
        assert_eq!(state.language, before.language);
        assert_eq!(state.input, before.input);
        assert_eq!(
            event,
            RoomEvent::CodeChanged {
                code: "print(1)".to_string()
            }
        );
    }

    #[test]
    fn test_apply_language_and_input_changes() {
        // テスト項目: 言語と入力の変更がそれぞれのフィールドに反映される
        // given (前提条件):
        let mut state = RoomState::default();

        // when (操作):
        let language_event = RoomStateChange::Language("python".to_string()).apply(&mut state);
        let input_event = RoomStateChange::Input("42\n".to_string()).apply(&mut state);

        // then (期待する結果):
        assert_eq!(state.language, "python");
        assert_eq!(state.input, "42\n");
        assert_eq!(
            language_event,
            RoomEvent::LanguageChanged {
                language: "python".to_string()
            }
        );
        assert_eq!(
            input_event,
            RoomEvent::InputChanged {
                input: "42\n".to_string()
            }
        );
    }

    #[test]
    fn test_failed_execution_result() {
        // テスト項目: 失敗時の実行結果は status が Error で time/memory が空になる
        // given (前提条件):
        let message = "boom";

        // when (操作):
        let result = ExecutionResult::failed(message);

        // then (期待する結果):
        assert_eq!(result.output, "");
        assert_eq!(result.error, "boom");
        assert_eq!(result.status, "Error");
        assert_eq!(result.time, None);
        assert_eq!(result.memory, None);
    }
}
