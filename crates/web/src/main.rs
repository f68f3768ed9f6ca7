//! Invitation list web client

use std::sync::Arc;

use leptos::prelude::*;

mod admin;
mod api;
mod home;
mod listing;
mod notifications;
mod popup;
mod session;
mod storage;
mod subscribe;
mod timers;

use admin::AdminPage;
use api::HttpApi;
use home::HomePage;
use notifications::{Notifications, ToastStack};
use session::SessionContext;
use storage::TokenStore;

/// Pages served by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Home,
    Admin,
    NotFound,
}

impl Route {
    fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" => Route::Home,
            "/admin" => Route::Admin,
            _ => Route::NotFound,
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn current_path() -> String {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
fn current_path() -> String {
    "/".to_string()
}

#[cfg(target_arch = "wasm32")]
fn token_store() -> Arc<dyn TokenStore> {
    Arc::new(storage::LocalStorageStore)
}

#[cfg(not(target_arch = "wasm32"))]
fn token_store() -> Arc<dyn TokenStore> {
    Arc::new(storage::MemoryTokenStore::default())
}

/// App shell: toast stack plus the routed page.
#[component]
fn App() -> impl IntoView {
    let api = HttpApi::from_build_env();
    let notifications = Notifications::new();

    let page = match Route::from_path(&current_path()) {
        Route::Home => view! { <HomePage api=api notifications=notifications /> }.into_any(),
        Route::Admin => {
            let session = SessionContext::new(token_store());

            view! { <AdminPage api=api session=session /> }.into_any()
        }
        Route::NotFound => view! { <div class="p-4">"Page Not Found"</div> }.into_any(),
    };

    view! {
        <ToastStack notifications=notifications />
        {page}
    }
}

fn main() {
    console_error_panic_hook::set_once();

    leptos::mount::mount_to_body(App);
}
