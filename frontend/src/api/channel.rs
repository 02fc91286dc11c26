//! Process-wide pickup notification channel.
//!
//! One WebSocket for the whole session, owned by the authenticated shell:
//! consumers read the shared notification store instead of opening their own
//! transport connection. Reconnects use bounded exponential backoff with
//! jitter. Frame parsing and backoff math are DOM-free so they run under
//! native tests.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::api::types::Notification;

pub const PICKUP_REQUESTED_EVENT: &str = "pickup:requested";

pub const BACKOFF_BASE_MS: u64 = 1_000;
pub const BACKOFF_CAP_MS: u64 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelStatus {
    Connecting,
    Connected,
    #[default]
    Disconnected,
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("undecodable notification frame: {0}")]
    Decode(String),
}

/// Wire shape of one push frame: `{ "event": <name>, "data": { ... } }`.
#[derive(Debug, Clone, Deserialize)]
struct ChannelFrame {
    event: String,
    #[serde(default)]
    data: Value,
}

/// Decode a raw text frame. Events other than the pickup notification are
/// ignored (`Ok(None)`); an unreadable frame is an error the caller logs.
pub fn parse_notification(raw: &str) -> Result<Option<Notification>, ChannelError> {
    let frame: ChannelFrame =
        serde_json::from_str(raw).map_err(|e| ChannelError::Decode(e.to_string()))?;
    if frame.event != PICKUP_REQUESTED_EVENT {
        return Ok(None);
    }
    serde_json::from_value(frame.data)
        .map(Some)
        .map_err(|e| ChannelError::Decode(e.to_string()))
}

/// Double the delay, capped.
pub fn next_backoff_ms(previous_ms: u64) -> u64 {
    previous_ms.saturating_mul(2).min(BACKOFF_CAP_MS)
}

/// Apply ±25% jitter; `unit` is a uniform sample in `[0, 1)`.
pub fn with_jitter(delay_ms: u64, unit: f64) -> u64 {
    let spread = delay_ms as f64 * 0.25;
    let jittered = delay_ms as f64 + (unit.clamp(0.0, 1.0) * 2.0 - 1.0) * spread;
    jittered.max(0.0) as u64
}

/// Closes the channel when dropped. Held by the authenticated shell and
/// dropped on its unmount, so the socket never outlives the UI that wants
/// the events.
pub struct ChannelHandle {
    stop: Option<futures::channel::oneshot::Sender<()>>,
}

impl ChannelHandle {
    pub fn close(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

impl Drop for ChannelHandle {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::spawn_notification_channel;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use super::*;
    use crate::{config, state::notifications::NotificationState, utils::storage};
    use futures::{
        channel::oneshot,
        future::{select, Either},
        StreamExt,
    };
    use gloo_net::websocket::{futures::WebSocket, Message};
    use leptos::*;
    use std::time::Duration;

    pub fn spawn_notification_channel(
        set_notifications: WriteSignal<NotificationState>,
    ) -> ChannelHandle {
        let (stop_tx, stop_rx) = oneshot::channel();
        spawn_local(channel_loop(set_notifications, stop_rx));
        ChannelHandle {
            stop: Some(stop_tx),
        }
    }

    async fn notification_url() -> Option<String> {
        let token = storage::stored_token()?;
        let base = config::await_ws_base_url().await;
        Some(format!("{base}/notifications?token={token}"))
    }

    async fn channel_loop(
        set_notifications: WriteSignal<NotificationState>,
        mut stop_rx: oneshot::Receiver<()>,
    ) {
        let mut delay_ms = BACKOFF_BASE_MS;

        'outer: loop {
            set_notifications.update(|s| s.set_status(ChannelStatus::Connecting));

            // Signed out: nothing to connect with.
            let Some(url) = notification_url().await else {
                break;
            };

            match WebSocket::open(&url) {
                Ok(mut socket) => {
                    set_notifications.update(|s| s.set_status(ChannelStatus::Connected));
                    delay_ms = BACKOFF_BASE_MS;

                    loop {
                        match select(socket.next(), &mut stop_rx).await {
                            Either::Left((Some(Ok(Message::Text(text))), _)) => {
                                match parse_notification(&text) {
                                    Ok(Some(notification)) => set_notifications
                                        .update(|s| s.push(notification)),
                                    Ok(None) => {}
                                    Err(err) => log::warn!("notification frame dropped: {err}"),
                                }
                            }
                            Either::Left((Some(Ok(Message::Bytes(_))), _)) => {}
                            Either::Left((Some(Err(err)), _)) => {
                                log::warn!("notification socket error: {err}");
                                break;
                            }
                            Either::Left((None, _)) => break,
                            Either::Right((_, next)) => {
                                drop(next);
                                let _ = socket.close(None, None);
                                break 'outer;
                            }
                        }
                    }
                }
                Err(err) => {
                    log::warn!("failed to open notification socket: {err}");
                }
            }

            set_notifications.update(|s| s.set_status(ChannelStatus::Disconnected));

            let sleep = gloo_timers::future::sleep(Duration::from_millis(with_jitter(
                delay_ms,
                js_sys::Math::random(),
            )));
            if let Either::Right(_) = select(Box::pin(sleep), &mut stop_rx).await {
                break 'outer;
            }
            delay_ms = next_backoff_ms(delay_ms);
        }

        set_notifications.update(|s| s.set_status(ChannelStatus::Disconnected));
    }
}
