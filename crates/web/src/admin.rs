//! Admin page: login gate and invite request table.

use jiff::Timestamp;
use leptos::{ev::SubmitEvent, prelude::*, task};

use crate::{
    api::{HttpApi, InvitesApi},
    listing::{InviteRequest, ListingView, load_invite_requests},
    session::{SessionContext, SessionState},
};

/// Login error when the failure carries no message.
const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

/// Send credentials and hand the returned token to the session gate.
///
/// Returns `true` when the session became authenticated.
pub async fn log_in<A: InvitesApi>(
    api: &A,
    session: &SessionContext,
    email: &str,
    password: &str,
) -> bool {
    if !session.begin_login() {
        return false;
    }

    match api.login(email, password).await {
        Ok(token) => session.complete_login(&token, Timestamp::now()),
        Err(error) => {
            let message = error.to_string();

            session.fail_login(if message.is_empty() {
                LOGIN_FAILED_MESSAGE.to_string()
            } else {
                message
            });

            false
        }
    }
}

/// `-` for missing values.
fn cell(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => "-".to_string(),
    }
}

/// Timestamps are shown in UTC; unparseable values pass through unchanged.
fn timestamp_cell(value: Option<&str>) -> String {
    match value.map(str::parse::<Timestamp>) {
        Some(Ok(timestamp)) => timestamp.strftime("%Y-%m-%d %H:%M:%S UTC").to_string(),
        _ => cell(value),
    }
}

fn spawn_load(api: HttpApi, session: &SessionContext, listing: ListingView) {
    let Some(token) = session.token() else {
        return;
    };

    task::spawn_local(async move {
        load_invite_requests(&api, &token, listing).await;
    });
}

/// `/admin`
#[component]
pub fn AdminPage(api: HttpApi, session: SessionContext) -> impl IntoView {
    let listing = ListingView::new();
    let login_email = RwSignal::new(String::new());
    let login_password = RwSignal::new(String::new());

    if session.restore(Timestamp::now()) {
        spawn_load(api.clone(), &session, listing);
    }

    let on_login = {
        let api = api.clone();
        let session = session.clone();

        move |event: SubmitEvent| {
            event.prevent_default();

            let api = api.clone();
            let session = session.clone();
            let email = login_email.get_untracked();
            let password = login_password.get_untracked();

            task::spawn_local(async move {
                if log_in(&api, &session, &email, &password).await {
                    login_email.set(String::new());
                    login_password.set(String::new());
                    spawn_load(api, &session, listing);
                }
            });
        }
    };

    let logout = {
        let session = session.clone();

        move || {
            session.logout();
            listing.reset();
            login_email.set(String::new());
            login_password.set(String::new());
        }
    };

    let state = session.state();

    view! {
        <div class="min-h-screen bg-gray-100">
            {move || match state.get() {
                SessionState::Authenticated => {
                    let logout = logout.clone();

                    view! { <Dashboard listing=listing on_logout=Callback::new(move |()| logout()) /> }
                        .into_any()
                }
                other => {
                    let pending = other == SessionState::Authenticating;
                    let error = match other {
                        SessionState::Error(message) => Some(message),
                        _ => None,
                    };

                    view! {
                        <LoginModal
                            email=login_email
                            password=login_password
                            error=error
                            pending=pending
                            on_submit=on_login.clone()
                        />
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn LoginModal(
    email: RwSignal<String>,
    password: RwSignal<String>,
    error: Option<String>,
    pending: bool,
    on_submit: impl FnMut(SubmitEvent) + 'static,
) -> impl IntoView {
    view! {
        <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/50">
            <div class="w-full max-w-md rounded-xl bg-white p-8 shadow-2xl">
                <h2 class="mb-6 text-center text-2xl font-bold text-gray-800">"Admin Login"</h2>
                <form class="space-y-6" on:submit=on_submit>
                    <div>
                        <label for="email" class="block text-sm font-medium text-gray-700">
                            "Email"
                        </label>
                        <input
                            type="email"
                            id="email"
                            required=true
                            class="mt-1 w-full rounded-lg border border-gray-300 px-4 py-2"
                            prop:value=move || email.get()
                            on:input=move |event| email.set(event_target_value(&event))
                        />
                    </div>
                    <div>
                        <label for="password" class="block text-sm font-medium text-gray-700">
                            "Password"
                        </label>
                        <input
                            type="password"
                            id="password"
                            required=true
                            class="mt-1 w-full rounded-lg border border-gray-300 px-4 py-2"
                            prop:value=move || password.get()
                            on:input=move |event| password.set(event_target_value(&event))
                        />
                    </div>
                    {error.map(|message| view! { <p class="text-center text-sm text-red-500">{message}</p> })}
                    <button
                        type="submit"
                        disabled=pending
                        class="w-full rounded-lg bg-blue-600 py-2 text-white hover:bg-blue-700 disabled:bg-blue-300"
                    >
                        {if pending { "Logging in..." } else { "Login" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[component]
fn Dashboard(listing: ListingView, on_logout: Callback<()>) -> impl IntoView {
    view! {
        <div class="container mx-auto p-6">
            <h1 class="mb-6 text-3xl font-bold text-gray-800">"Admin Dashboard"</h1>
            {move || {
                listing
                    .error
                    .get()
                    .map(|message| view! { <p class="mb-4 text-red-500">{message}</p> })
            }}
            <div class="mb-4">
                <input
                    type="text"
                    placeholder="Search all fields..."
                    class="w-full rounded-lg border border-gray-300 px-4 py-2 md:w-1/3"
                    prop:value=move || listing.search_term.get()
                    on:input=move |event| listing.set_search_term(event_target_value(&event))
                />
            </div>
            <div class="overflow-x-auto rounded-lg bg-white shadow-md">
                <table class="min-w-full divide-y divide-gray-200">
                    <thead class="bg-gray-50">
                        <tr>
                            <th class="px-4 py-3 text-left text-xs font-medium uppercase text-gray-500">"ID"</th>
                            <th class="px-4 py-3 text-left text-xs font-medium uppercase text-gray-500">"Full Name"</th>
                            <th class="px-4 py-3 text-left text-xs font-medium uppercase text-gray-500">"Email"</th>
                            <th class="px-4 py-3 text-left text-xs font-medium uppercase text-gray-500">"Source"</th>
                            <th class="px-4 py-3 text-left text-xs font-medium uppercase text-gray-500">"Status"</th>
                            <th class="px-4 py-3 text-left text-xs font-medium uppercase text-gray-500">"Note"</th>
                            <th class="px-4 py-3 text-left text-xs font-medium uppercase text-gray-500">"Created At"</th>
                            <th class="px-4 py-3 text-left text-xs font-medium uppercase text-gray-500">"Updated At"</th>
                            <th class="px-4 py-3 text-left text-xs font-medium uppercase text-gray-500">"Last Email At"</th>
                            <th class="px-4 py-3 text-left text-xs font-medium uppercase text-gray-500">"Invited At"</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-gray-200 bg-white">
                        <For
                            each=move || listing.visible()
                            key=|row| row.id
                            children=move |row: InviteRequest| view! { <InviteRow row=row /> }
                        />
                    </tbody>
                </table>
            </div>
            <div class="mt-4 flex items-center justify-between">
                <button
                    type="button"
                    title="Previous Page"
                    class="rounded-lg bg-gray-200 px-4 py-2 disabled:opacity-50"
                    disabled=move || !listing.has_previous()
                    on:click=move |_| listing.previous_page()
                >
                    "←"
                </button>
                <span class="text-gray-700">
                    {move || {
                        format!(
                            "Page {} of {} ({} total records)",
                            listing.current_page.get(),
                            listing.total_pages(),
                            listing.filtered().len(),
                        )
                    }}
                </span>
                <button
                    type="button"
                    title="Next Page"
                    class="rounded-lg bg-gray-200 px-4 py-2 disabled:opacity-50"
                    disabled=move || !listing.has_next()
                    on:click=move |_| listing.next_page()
                >
                    "→"
                </button>
            </div>
            <button
                type="button"
                class="mt-6 rounded-lg bg-red-500 px-4 py-2 text-white hover:bg-red-600"
                on:click=move |_| on_logout.run(())
            >
                "Logout"
            </button>
        </div>
    }
}

#[component]
fn InviteRow(row: InviteRequest) -> impl IntoView {
    view! {
        <tr>
            <td class="px-4 py-3 text-sm text-gray-900">{row.id}</td>
            <td class="px-4 py-3 text-sm text-gray-900">{cell(row.full_name.as_deref())}</td>
            <td class="px-4 py-3 text-sm text-gray-900">{cell(row.email.as_deref())}</td>
            <td class="px-4 py-3 text-sm text-gray-900">{cell(row.source.as_deref())}</td>
            <td class="px-4 py-3 text-sm text-gray-900">{cell(row.status.as_deref())}</td>
            <td class="px-4 py-3 text-sm text-gray-900">{cell(row.note.as_deref())}</td>
            <td class="px-4 py-3 text-sm text-gray-900">{timestamp_cell(row.created_at.as_deref())}</td>
            <td class="px-4 py-3 text-sm text-gray-900">{timestamp_cell(row.updated_at.as_deref())}</td>
            <td class="px-4 py-3 text-sm text-gray-900">{timestamp_cell(row.last_email_at.as_deref())}</td>
            <td class="px-4 py-3 text-sm text-gray-900">{timestamp_cell(row.invited_at.as_deref())}</td>
        </tr>
    }
}
