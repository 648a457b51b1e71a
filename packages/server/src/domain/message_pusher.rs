//! MessagePusher trait 定義
//!
//! ルームのメンバーへイベントを届けるためのインターフェースです。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, event::RoomEvent, value_object::ConnectionId};

/// 接続ごとの送信チャンネル（エンコード済みのフレームを運ぶ）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// イベント送信の抽象化
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを削除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定の接続にイベントを送信（ユニキャスト）
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続にイベントを送信
    ///
    /// 一部の接続への送信失敗は許容し、ログに残すだけとする。
    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;
}
