//! Routing of client events to use cases.
//!
//! Frames that fail to parse, carry invalid ids, or come from connections that
//! have not joined the target room are logged and dropped. Nothing is reported
//! back to the sender.

use std::sync::Arc;

use crate::{
    domain::{
        ConnectionId, Departure, DisplayName, ExecutionRequest, MessagePusher, PusherChannel,
        RoomId, RoomStateChange,
    },
    infrastructure::dto::websocket::ClientMessage,
    usecase::{ExecuteCodeUseCase, JoinRoomUseCase, LeaveRoomUseCase, UpdateRoomStateUseCase},
};

/// Dispatches decoded client events for every live connection.
pub struct EventRouter {
    join_room_usecase: Arc<JoinRoomUseCase>,
    update_room_state_usecase: Arc<UpdateRoomStateUseCase>,
    execute_code_usecase: Arc<ExecuteCodeUseCase>,
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl EventRouter {
    pub fn new(
        join_room_usecase: Arc<JoinRoomUseCase>,
        update_room_state_usecase: Arc<UpdateRoomStateUseCase>,
        execute_code_usecase: Arc<ExecuteCodeUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            join_room_usecase,
            update_room_state_usecase,
            execute_code_usecase,
            leave_room_usecase,
            message_pusher,
        }
    }

    /// Registers the outbound channel of a new connection.
    pub async fn connect(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;
        tracing::info!("Connection '{}' opened", connection_id);
    }

    /// Decodes a text frame and routes it.
    pub async fn route_frame(&self, connection_id: &ConnectionId, frame: &str) {
        match serde_json::from_str::<ClientMessage>(frame) {
            Ok(message) => self.route(connection_id, message).await,
            Err(e) => {
                tracing::warn!("Ignoring malformed frame from '{}': {}", connection_id, e);
            }
        }
    }

    pub async fn route(&self, connection_id: &ConnectionId, message: ClientMessage) {
        tracing::debug!("Event '{}' from '{}'", message.name(), connection_id);
        match message {
            ClientMessage::Join { room_id, username } => {
                let (Ok(room_id), Ok(display_name)) =
                    (RoomId::new(room_id), DisplayName::new(username))
                else {
                    tracing::warn!("Ignoring join with empty roomId or username");
                    return;
                };
                tracing::info!(
                    "'{}' ({}) joins room '{}'",
                    display_name,
                    connection_id,
                    room_id
                );
                if let Err(e) = self
                    .join_room_usecase
                    .execute(connection_id.clone(), room_id, display_name)
                    .await
                {
                    tracing::warn!("Join by '{}' failed: {}", connection_id, e);
                }
            }
            ClientMessage::CodeChange { room_id, code } => {
                self.update(connection_id, room_id, RoomStateChange::Code(code))
                    .await;
            }
            ClientMessage::LanguageChange { room_id, language } => {
                self.update(connection_id, room_id, RoomStateChange::Language(language))
                    .await;
            }
            ClientMessage::InputChange { room_id, input } => {
                self.update(connection_id, room_id, RoomStateChange::Input(input))
                    .await;
            }
            ClientMessage::ExecuteCode {
                room_id,
                code,
                language,
                input,
            } => {
                let Ok(room_id) = RoomId::new(room_id) else {
                    tracing::warn!("Ignoring execute_code with empty roomId");
                    return;
                };
                let request = ExecutionRequest {
                    code,
                    language,
                    input,
                };
                if let Err(e) = self
                    .execute_code_usecase
                    .execute(connection_id, room_id, request)
                    .await
                {
                    tracing::warn!("Ignoring execute_code from '{}': {}", connection_id, e);
                }
            }
        }
    }

    /// Removes the connection everywhere and notifies the rooms it left.
    pub async fn disconnect(&self, connection_id: &ConnectionId) -> Departure {
        let departure = self.leave_room_usecase.execute(connection_id).await;
        tracing::info!(
            "Connection '{}' closed (left {} room(s))",
            connection_id,
            departure.rooms.len()
        );
        departure
    }

    async fn update(&self, connection_id: &ConnectionId, room_id: String, change: RoomStateChange) {
        let Ok(room_id) = RoomId::new(room_id) else {
            tracing::warn!("Ignoring update with empty roomId");
            return;
        };
        if let Err(e) = self
            .update_room_state_usecase
            .execute(connection_id, &room_id, change)
            .await
        {
            tracing::debug!(
                "Ignoring update from '{}' to room '{}': {}",
                connection_id,
                room_id,
                e
            );
        }
    }
}
