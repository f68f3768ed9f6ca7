//! Transient toast notifications.

use leptos::{prelude::*, task};

use crate::timers::wait_for_timeout;

/// How long a toast stays up.
const TOAST_LIFETIME_MS: i32 = 4000;

/// Toast flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Positive outcome
    Success,

    /// Nothing went wrong, but nothing happened either
    Warning,

    /// Failure
    Error,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "border-emerald-300 bg-emerald-50 text-emerald-800",
            ToastKind::Warning => "border-amber-300 bg-amber-50 text-amber-800",
            ToastKind::Error => "border-red-300 bg-red-50 text-red-800",
        }
    }
}

/// A toast on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Unique per page load
    pub id: u64,

    /// Flavour
    pub kind: ToastKind,

    /// Text
    pub message: String,
}

/// Toast list shared by the page.
#[derive(Debug, Clone, Copy)]
pub struct Notifications {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifications {
    /// Empty list.
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    /// Current toasts, oldest first.
    pub fn toasts(&self) -> ReadSignal<Vec<Toast>> {
        self.toasts.read_only()
    }

    /// Replace every toast with a new one and return its id.
    pub fn show(&self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_id.get_untracked();
        self.next_id.set(id.saturating_add(1));

        let toast = Toast {
            id,
            kind,
            message: message.into(),
        };

        self.dismiss_all();
        self.toasts.update(|toasts| toasts.push(toast));

        id
    }

    /// [`Self::show`], then expire the toast after its lifetime.
    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        let id = self.show(kind, message);
        let notifications = *self;

        task::spawn_local(async move {
            wait_for_timeout(TOAST_LIFETIME_MS).await;
            notifications.dismiss(id);
        });
    }

    /// Remove one toast. Unknown ids are ignored.
    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|toast| toast.id != id));
    }

    /// Remove every toast.
    pub fn dismiss_all(&self) {
        self.toasts.set(Vec::new());
    }
}

/// Renders the toast stack in the top-right corner.
#[component]
pub fn ToastStack(notifications: Notifications) -> impl IntoView {
    view! {
        <div class="fixed top-4 right-4 z-50 flex flex-col gap-2" role="status" aria-live="polite">
            <For
                each=move || notifications.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;

                    view! {
                        <div class=format!(
                            "flex items-start gap-3 rounded-lg border px-4 py-3 text-sm shadow {}",
                            toast.kind.class(),
                        )>
                            <span class="flex-1">{toast.message}</span>
                            <button
                                type="button"
                                class="opacity-60 hover:opacity-100"
                                aria-label="Dismiss notification"
                                on:click=move |_| notifications.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
