mod components;
mod panel;
pub mod utils;

use leptos::*;
use panel::LoginPanel;

#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface flex flex-col justify-center py-12 sm:px-6 lg:px-8">
            <div class="sm:mx-auto sm:w-full sm:max-w-md">
                <h2 class="text-center text-3xl font-extrabold text-fg">
                    "Sign in to Freightdesk"
                </h2>
            </div>
            <div class="mt-8 sm:mx-auto sm:w-full sm:max-w-md">
                <div class="bg-surface-elevated py-8 px-4 shadow sm:rounded-lg sm:px-10">
                    <LoginPanel/>
                </div>
            </div>
        </div>
    }
}
