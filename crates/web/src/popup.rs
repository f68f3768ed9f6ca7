//! Confirmation popup shown after a successful signup.

use leptos::{prelude::*, task};

use crate::timers::wait_for_timeout;

const VISIBLE_MS: i32 = 3000;

const FADE_MS: i32 = 600;

/// Popup lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupPhase {
    /// Not rendered
    #[default]
    Hidden,

    /// Fully shown
    Visible,

    /// Fading out before being hidden
    FadingOut,
}

/// Popup state with generation-guarded auto-dismiss.
#[derive(Debug, Clone, Copy)]
pub struct Popup {
    phase: RwSignal<PopupPhase>,
    generation: RwSignal<u64>,
}

impl Default for Popup {
    fn default() -> Self {
        Self::new()
    }
}

impl Popup {
    /// Hidden popup.
    pub fn new() -> Self {
        Self {
            phase: RwSignal::new(PopupPhase::Hidden),
            generation: RwSignal::new(0),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> ReadSignal<PopupPhase> {
        self.phase.read_only()
    }

    /// Show the popup and return the generation owning its auto-dismiss.
    pub fn show(&self) -> u64 {
        let run_id = self.bump();
        self.phase.set(PopupPhase::Visible);

        run_id
    }

    /// [`Self::show`], then fade out and hide on a timer.
    pub fn show_and_schedule(&self) {
        let run_id = self.show();
        let popup = *self;

        task::spawn_local(async move {
            wait_for_timeout(VISIBLE_MS).await;

            if !popup.begin_fade(run_id) {
                return;
            }

            wait_for_timeout(FADE_MS).await;

            popup.finish(run_id);
        });
    }

    /// Hide now; any pending timer becomes stale.
    pub fn dismiss(&self) {
        self.bump();
        self.phase.set(PopupPhase::Hidden);
    }

    /// Invalidate pending timers without touching the phase.
    pub fn teardown(&self) {
        self.bump();
    }

    fn is_current(&self, run_id: u64) -> bool {
        self.generation.get_untracked() == run_id
    }

    fn begin_fade(&self, run_id: u64) -> bool {
        let applies = self.is_current(run_id) && self.phase.get_untracked() == PopupPhase::Visible;

        if applies {
            self.phase.set(PopupPhase::FadingOut);
        }

        applies
    }

    fn finish(&self, run_id: u64) -> bool {
        let applies =
            self.is_current(run_id) && self.phase.get_untracked() == PopupPhase::FadingOut;

        if applies {
            self.phase.set(PopupPhase::Hidden);
        }

        applies
    }

    fn bump(&self) -> u64 {
        self.generation.update(|generation| {
            *generation = generation.saturating_add(1);
        });

        self.generation.get_untracked()
    }
}

/// The "Congratulations!" dialog.
#[component]
pub fn ConfirmationPopup(popup: Popup) -> impl IntoView {
    on_cleanup(move || popup.teardown());

    move || {
        let phase = popup.phase().get();

        if phase == PopupPhase::Hidden {
            return ().into_any();
        }

        let (overlay, card) = if phase == PopupPhase::FadingOut {
            ("opacity-0", "scale-95 opacity-0")
        } else {
            ("opacity-100", "scale-100 opacity-100")
        };

        view! {
            <div class=format!(
                "fixed inset-0 z-50 flex items-center justify-center bg-black/50 transition-opacity duration-500 {overlay}",
            )>
                <div
                    class=format!(
                        "relative w-[90%] max-w-sm rounded-xl border border-[#a58c74] bg-[#fcfaf7] p-6 text-center shadow-lg transition-transform duration-500 sm:p-8 {card}",
                    )
                    role="dialog"
                    aria-modal="true"
                    aria-labelledby="invite-confirmation-title"
                >
                    <h2
                        id="invite-confirmation-title"
                        class="mb-3 text-xl font-semibold text-[#3e2f2f] sm:mb-4 sm:text-2xl"
                    >
                        "Congratulations!"
                    </h2>
                    <p class="mb-5 text-sm text-[#5c5346] sm:mb-6 sm:text-base">
                        "Your invitation request has been received."
                    </p>
                    <button
                        type="button"
                        class="w-full rounded-lg bg-[#f5e6e8] px-5 py-2.5 text-[#3e2f2f] transition hover:bg-[#edd2d6] sm:w-auto"
                        on:click=move |_| popup.dismiss()
                    >
                        "Close"
                    </button>
                </div>
            </div>
        }
        .into_any()
    }
}
