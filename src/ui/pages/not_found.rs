//! Not found page component
//!
//! A 404 error page displayed when a route is not found.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <Title text="Celestia - Page Not Found"/>

        <main class="not-found">
            <div class="notification-card">
                // Error code
                <h1 class="hero-title">"404"</h1>

                <p class="notification-text">
                    "This page drifted out of orbit."
                </p>

                <A href="/" attr:class="notification-btn">
                    "Back to Celestia"
                </A>
            </div>
        </main>
    }
}
