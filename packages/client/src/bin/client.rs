//! CLI client for the study-room realtime server.
//!
//! Connects to the server, joins a room, and sends chat messages from stdin.
//! Slash commands share the pomodoro timer status (`/status focusing`),
//! leave the room (`/leave`) or end the session (`/quit`).
//! Automatically reconnects on disconnection (max 5 attempts with 5 second
//! interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin studyroom-client -- --room-id 1 --name Alice
//! cargo run --bin studyroom-client -- -r 1 -n Bob -i u-bob
//! ```

use clap::Parser;

use studyroom_client::runner::run_client;
use studyroom_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "CLI client for the study-room realtime server", long_about = None)]
struct Args {
    /// Room to join
    #[arg(short = 'r', long)]
    room_id: i64,

    /// User id to join as (server generates one when omitted)
    #[arg(short = 'i', long)]
    user_id: Option<String>,

    /// Display name (server falls back to "Anonymous" when omitted)
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = run_client(args.url, args.room_id, args.user_id, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
