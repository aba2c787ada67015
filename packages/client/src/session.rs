//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use studyroom_server::infrastructure::dto::websocket::{
    ChatPayload, ClientEnvelope, JoinPayload, LeavePayload, ServerEnvelope, TimerStatusPayload,
    UserPayload,
};

use crate::{
    command::{Command, parse_line},
    error::ClientError,
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

/// Run one WebSocket client session: connect, join the room, then pump
/// terminal input out and server envelopes in until either side ends.
pub async fn run_client_session(
    url: &str,
    room_id: i64,
    user_id: Option<String>,
    name: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (ws_stream, _response) = match connect_async(url).await {
        Ok(result) => result,
        Err(e) => {
            return Err(Box::new(ClientError::ConnectionError(e.to_string())));
        }
    };

    tracing::info!("Connected to studyroom server!");

    let prompt_label = name.clone().unwrap_or_else(|| "anonymous".to_string());
    println!(
        "\nJoining room {}. Type messages and press Enter to send.\n\
         Commands: /status <focusing|idle>, /leave, /quit\n",
        room_id
    );

    let (mut write, mut read) = ws_stream.split();

    // Join immediately; the server resolves our identity and acks with `joined`
    let join = ClientEnvelope::Join(JoinPayload {
        room_id: Some(room_id),
        user: Some(UserPayload {
            id: user_id.clone(),
            name: name.clone(),
        }),
    });
    let join_json = serde_json::to_string(&join)?;
    if let Err(e) = write.send(Message::Text(join_json.into())).await {
        return Err(Box::new(ClientError::ConnectionError(e.to_string())));
    }

    // Spawn a task to handle incoming envelopes
    let prompt_label_for_read = prompt_label.clone();
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ServerEnvelope>(&text) {
                        Ok(ServerEnvelope::Joined(payload)) => {
                            MessageFormatter::format_joined(&payload)
                        }
                        Ok(ServerEnvelope::ChatMessage(payload)) => {
                            MessageFormatter::format_chat_message(&payload)
                        }
                        Ok(ServerEnvelope::TimerStatus(payload)) => {
                            MessageFormatter::format_timer_status(&payload)
                        }
                        Ok(ServerEnvelope::RoomMembersUpdate(payload)) => {
                            MessageFormatter::format_room_members(&payload)
                        }
                        Ok(ServerEnvelope::Error(payload)) => {
                            MessageFormatter::format_error(&payload)
                        }
                        Err(_) => MessageFormatter::format_raw_message(&text),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&prompt_label_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let prompt_label_for_input = prompt_label.clone();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", prompt_label_for_input);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task that maps input lines to protocol envelopes
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let envelope = match parse_line(&line) {
                None => continue,
                Some(Command::Quit) => break,
                Some(Command::Leave) => ClientEnvelope::Leave(LeavePayload {}),
                Some(Command::Status(status)) => ClientEnvelope::TimerStatus(TimerStatusPayload {
                    status: Some(status),
                }),
                Some(Command::Chat(content)) => ClientEnvelope::Chat(ChatPayload {
                    room_id: Some(room_id),
                    content: Some(content),
                }),
            };

            let json = match serde_json::to_string(&envelope) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize envelope: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send message: {}", e);
                write_error = true;
                break;
            }
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            let connection_error = read_result.unwrap_or(false);
            if connection_error {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            let write_error = write_result.unwrap_or(false);
            if write_error {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
    }

    Ok(())
}
