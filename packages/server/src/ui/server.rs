//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    GetRoomPresenceUseCase, JoinRoomUseCase, LeaveRoomUseCase, SendChatUseCase,
    UpdateTimerStatusUseCase,
};

use super::{
    handler::{get_room_presence, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Realtime presence server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     join_room_usecase,
///     leave_room_usecase,
///     send_chat_usecase,
///     update_timer_status_usecase,
///     get_room_presence_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// JoinRoomUseCase（ルーム参加のユースケース）
    join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// SendChatUseCase（チャット送信のユースケース）
    send_chat_usecase: Arc<SendChatUseCase>,
    /// UpdateTimerStatusUseCase（タイマーステータス更新のユースケース）
    update_timer_status_usecase: Arc<UpdateTimerStatusUseCase>,
    /// GetRoomPresenceUseCase（ルーム presence 取得のユースケース）
    get_room_presence_usecase: Arc<GetRoomPresenceUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        join_room_usecase: Arc<JoinRoomUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        send_chat_usecase: Arc<SendChatUseCase>,
        update_timer_status_usecase: Arc<UpdateTimerStatusUseCase>,
        get_room_presence_usecase: Arc<GetRoomPresenceUseCase>,
    ) -> Self {
        Self {
            join_room_usecase,
            leave_room_usecase,
            send_chat_usecase,
            update_timer_status_usecase,
            get_room_presence_usecase,
        }
    }

    /// Run the realtime presence server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            join_room_usecase: self.join_room_usecase,
            leave_room_usecase: self.leave_room_usecase,
            send_chat_usecase: self.send_chat_usecase,
            update_timer_status_usecase: self.update_timer_status_usecase,
            get_room_presence_usecase: self.get_room_presence_usecase,
        });

        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms/{room_id}/presence", get(get_room_presence))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Realtime presence server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
