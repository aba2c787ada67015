//! Realtime presence server for the study-room application.
//!
//! Accepts WebSocket connections, tracks per-room presence and fans out
//! chat/status/roster events to every live connection in a room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin studyroom-server
//! cargo run --bin studyroom-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use studyroom_server::{
    infrastructure::hub::InMemoryRealtimeHub,
    ui::Server,
    usecase::{
        GetRoomPresenceUseCase, JoinRoomUseCase, LeaveRoomUseCase, SendChatUseCase,
        UpdateTimerStatusUseCase,
    },
};
use studyroom_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Realtime room presence and broadcast server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Hub
    // 2. UseCases
    // 3. Server

    // 1. Create the realtime hub (in-memory, single critical section)
    let hub = Arc::new(InMemoryRealtimeHub::new());

    // 2. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(hub.clone()));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(hub.clone()));
    let send_chat_usecase = Arc::new(SendChatUseCase::new(hub.clone()));
    let update_timer_status_usecase = Arc::new(UpdateTimerStatusUseCase::new(hub.clone()));
    let get_room_presence_usecase = Arc::new(GetRoomPresenceUseCase::new(hub.clone()));

    // 3. Create and run the server
    let server = Server::new(
        join_room_usecase,
        leave_room_usecase,
        send_chat_usecase,
        update_timer_status_usecase,
        get_room_presence_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
