use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};

use async_io::block_on;
use tracing::{debug, warn};
use zbus::Connection;
use zvariant::Value;

use crate::config::NotificationSettings;
use crate::error::AnnounceError;

use super::{Announcer, NowPlaying};

const DESTINATION: &str = "org.freedesktop.Notifications";
const OBJECT_PATH: &str = "/org/freedesktop/Notifications";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Notification {
    summary: String,
    body: String,
    icon: String,
}

/// Desktop notifications over the session bus.
///
/// Delivery happens on a worker thread so the engine's dispatch thread never
/// waits on D-Bus.
pub struct DesktopNotifier {
    tx: Sender<Notification>,
    icon: Option<String>,
}

impl DesktopNotifier {
    pub fn spawn(settings: &NotificationSettings) -> Self {
        let (tx, rx) = mpsc::channel::<Notification>();
        let app_name = settings.app_name.clone();
        let timeout_ms = settings.timeout_ms;

        let spawned = std::thread::Builder::new()
            .name("notifier".to_string())
            .spawn(move || run_worker(rx, &app_name, timeout_ms));
        if let Err(e) = spawned {
            // Sends will fail with `WorkerGone` and get logged per track.
            warn!(error = %e, "failed to start notification worker");
        }

        Self {
            tx,
            icon: settings.icon.clone(),
        }
    }

    fn notification_for(&self, now: &NowPlaying) -> Notification {
        Notification {
            summary: "Now playing".to_string(),
            body: now.title.clone(),
            icon: self.icon.clone().unwrap_or_default(),
        }
    }
}

impl Announcer for DesktopNotifier {
    fn name(&self) -> &'static str {
        "desktop-notification"
    }

    fn announce(&self, now: &NowPlaying) -> Result<(), AnnounceError> {
        self.tx
            .send(self.notification_for(now))
            .map_err(|_| AnnounceError::WorkerGone)
    }
}

fn run_worker(rx: Receiver<Notification>, app_name: &str, timeout_ms: i32) {
    let mut connection: Option<Connection> = None;

    for notification in rx {
        let result = block_on(deliver(&mut connection, app_name, timeout_ms, &notification));
        match result {
            Ok(()) => debug!(body = %notification.body, "notification sent"),
            Err(e) => {
                // Reconnect on the next notification.
                connection = None;
                warn!(error = %e, "desktop notification failed");
            }
        }
    }
}

async fn deliver(
    connection: &mut Option<Connection>,
    app_name: &str,
    timeout_ms: i32,
    n: &Notification,
) -> zbus::Result<()> {
    let conn = match connection.take() {
        Some(c) => c,
        None => Connection::session().await?,
    };

    let actions: Vec<&str> = Vec::new();
    let hints: HashMap<&str, Value<'_>> = HashMap::new();
    let reply = conn
        .call_method(
            Some(DESTINATION),
            OBJECT_PATH,
            Some(DESTINATION),
            "Notify",
            &(
                app_name,
                0u32,
                n.icon.as_str(),
                n.summary.as_str(),
                n.body.as_str(),
                actions,
                hints,
                timeout_ms,
            ),
        )
        .await;

    *connection = Some(conn);
    reply.map(|_| ())
}
