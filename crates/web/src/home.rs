//! Landing page with the invitation form.

use leptos::{ev::SubmitEvent, prelude::*, task};

use crate::{
    api::HttpApi,
    notifications::Notifications,
    popup::{ConfirmationPopup, Popup},
    subscribe::{SubscribeForm, submit},
};

/// `/`
#[component]
pub fn HomePage(api: HttpApi, notifications: Notifications) -> impl IntoView {
    let form = SubscribeForm::new();
    let popup = Popup::new();

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();

        let api = api.clone();

        task::spawn_local(async move {
            let outcome = submit(&api, form).await;
            outcome.present(notifications, popup);
        });
    };

    view! {
        <div
            class="relative flex min-h-screen flex-col items-center justify-center bg-[#f8f5f0] p-4 font-serif sm:p-6"
            style="background-image: repeating-linear-gradient(45deg, #fdfdfb 0, #fdfdfb 20px, #fcfaf7 20px, #fcfaf7 40px);"
        >
            <h1
                class="select-none text-center leading-tight tracking-wide text-[#3e2f2f]"
                style="font-size: clamp(2.75rem, 6vw, 6rem); font-family: 'Kunstler Script', serif; font-style: italic; font-weight: 500;"
            >
                "Shahu Mumbai"
            </h1>
            <div class="mb-6 mt-6 w-full max-w-md px-2 text-center sm:mb-8 sm:mt-8">
                <p class="leading-relaxed text-[#5c5346]">"Bringing the Indian Heritage to you."</p>
                <p class="mt-2 leading-relaxed text-[#5c5346]">"Receive your invitation."</p>
            </div>
            <form
                class="w-full max-w-[28rem] overflow-hidden rounded-xl border border-[#a58c74] bg-[#fcfaf7] px-2 shadow-sm"
                aria-label="Invitation form"
                on:submit=on_submit
            >
                <div class="flex items-stretch">
                    <input
                        type="email"
                        inputmode="email"
                        autocomplete="email"
                        placeholder="Email address"
                        aria-label="Email address for invitation"
                        class="flex-grow bg-transparent px-3 py-3 text-base text-[#3e2f2f] placeholder-[#9a8c7c] focus:outline-none disabled:opacity-50 sm:text-lg"
                        prop:value=move || form.email.get()
                        on:input=move |event| form.email.set(event_target_value(&event))
                        disabled=move || form.pending.get()
                    />
                    <button
                        type="submit"
                        aria-label="Submit email"
                        class="flex items-center justify-center rounded-r-xl bg-[#f5e6e8] px-4 transition hover:bg-[#edd2d6] disabled:cursor-not-allowed disabled:opacity-40 sm:px-5"
                        disabled=move || form.pending.get()
                    >
                        {move || {
                            if form.pending.get() {
                                view! {
                                    <div class="h-5 w-5 animate-spin rounded-full border-2 border-[#3e2f2f] border-opacity-30" />
                                }
                                    .into_any()
                            } else {
                                view! { <span class="h-5 w-5 text-[#3e2f2f]" aria-hidden="true">"→"</span> }
                                    .into_any()
                            }
                        }}
                    </button>
                </div>
            </form>
            <ConfirmationPopup popup=popup />
        </div>
    }
}
