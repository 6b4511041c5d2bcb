use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::core::settings::{LandingSettings, SETTINGS_META_NAME};
use crate::ui::{LandingPage, NotFoundPage};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    // Provided by the server per request; the client reads it back at mount
    let settings = use_context::<LandingSettings>().unwrap_or_default();
    let settings_json = settings.to_json().unwrap_or_default();

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name=SETTINGS_META_NAME content=settings_json/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
                <noscript>
                    <style>"body { opacity: 1; }"</style>
                </noscript>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/celestia.css"/>

        <Title text="Celestia"/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=path!("/") view=LandingPage />
            </Routes>
        </Router>
    }
}
