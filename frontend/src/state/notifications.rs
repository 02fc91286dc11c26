use leptos::*;

use crate::api::{channel::ChannelStatus, types::Notification};

pub type NotificationContext = (
    ReadSignal<NotificationState>,
    WriteSignal<NotificationState>,
);

/// Session-scoped notification list fed by the push channel. In memory
/// only; survives navigation but not a reload.
#[derive(Debug, Clone, Default)]
pub struct NotificationState {
    pub items: Vec<Notification>,
    pub status: ChannelStatus,
}

impl NotificationState {
    /// Most-recent-first. Duplicates are kept exactly as delivered.
    pub fn push(&mut self, notification: Notification) {
        self.items.insert(0, notification);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn set_status(&mut self, status: ChannelStatus) {
        self.status = status;
    }

    pub fn unread_count(&self) -> usize {
        self.items
            .iter()
            .filter(|notification| notification.read_at.is_none())
            .count()
    }
}

#[component]
pub fn NotificationProvider(children: Children) -> impl IntoView {
    let ctx: NotificationContext = create_signal(NotificationState::default());
    provide_context(ctx);
    view! { <>{children()}</> }
}

pub fn use_notifications() -> NotificationContext {
    use_context::<NotificationContext>()
        .unwrap_or_else(|| create_signal(NotificationState::default()))
}
