//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{ExecutionError, MessagePushError};

/// ルーム参加のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error("failed to deliver room state: {0}")]
    StateDeliveryFailed(MessagePushError),
}

/// ルーム状態変更のエラー
///
/// いずれもクライアントには通知せず、ログに残して破棄する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateRoomStateError {
    #[error("connection has not joined the room")]
    NotJoined,
    #[error("room does not exist")]
    UnknownRoom,
    #[error("broadcast failed: {0}")]
    BroadcastFailed(MessagePushError),
}

/// ルームでのコード実行開始のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecuteCodeError {
    #[error("connection has not joined the room")]
    NotJoined,
}

/// HTTP 経由のコード実行のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunCodeError {
    /// リクエストの不備（副作用なし）
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,
}
