//! Landing page component
//!
//! Server-rendered markup of the "coming soon" page:
//! - fixed layers for the mouse trail, particles and the theme toggle
//! - hero section with the glass countdown card
//! - feature cards
//! - notify-me signup card
//!
//! The interactive layer is attached after hydration by
//! `ui::experience::mount_experience`, which looks elements up by the ids and
//! classes rendered here.

use leptos::prelude::*;
use leptos_meta::{Meta, Title};

struct Feature {
    icon: &'static str,
    title: &'static str,
    text: &'static str,
}

const FEATURES: [Feature; 3] = [
    Feature {
        icon: "✨",
        title: "Crafted Details",
        text: "Every pixel considered, every transition tuned to feel effortless.",
    },
    Feature {
        icon: "⚡",
        title: "Lightning Fast",
        text: "Built on a foundation that responds the instant you do.",
    },
    Feature {
        icon: "🔒",
        title: "Private by Design",
        text: "Your data stays yours. No tracking, no compromises.",
    },
];

/// Landing page with countdown, features and signup
#[component]
pub fn LandingPage() -> impl IntoView {
    #[cfg(not(feature = "ssr"))]
    Effect::new(move |_| {
        if let Err(err) = crate::ui::experience::mount_experience() {
            leptos::logging::error!("interactive layer not started: {err}");
        }
    });

    view! {
        <Title text="Celestia - Coming Soon"/>
        <Meta
            name="description"
            content="Celestia is launching soon. Leave your email to be notified on launch day."
        />

        <div class="mouse-trail" id="mouseTrail"></div>
        <div class="particles-container" id="particlesContainer"></div>

        <button class="theme-toggle" id="themeToggle" aria-label="Toggle light and dark theme">
            <span class="theme-icon theme-icon-sun">"☀️"</span>
            <span class="theme-icon theme-icon-moon">"🌙"</span>
        </button>

        <nav class="nav">
            <a href="#home" class="nav-logo">"Celestia"</a>
            <div class="nav-links">
                <a href="#features">"Features"</a>
                <a href="#notify">"Get Notified"</a>
            </div>
        </nav>

        <main>
            <section class="hero" id="home">
                <div class="hero-content">
                    <div class="hero-badge">"Coming Soon"</div>
                    <h1 class="hero-title">"Celestia"</h1>
                    <p class="hero-subtitle">
                        "Something extraordinary is on its way. A new experience, designed with intention."
                    </p>

                    <div class="countdown-glass-card">
                        <div class="countdown" id="countdown">
                            <CountdownUnit id="days" label="Days" placeholder="000"/>
                            <span class="countdown-separator">":"</span>
                            <CountdownUnit id="hours" label="Hours" placeholder="00"/>
                            <span class="countdown-separator">":"</span>
                            <CountdownUnit id="minutes" label="Minutes" placeholder="00"/>
                            <span class="countdown-separator">":"</span>
                            <CountdownUnit id="seconds" label="Seconds" placeholder="00"/>
                        </div>
                    </div>
                </div>
            </section>

            <section class="features" id="features">
                <h2 class="section-title">"Why Celestia"</h2>
                <div class="features-grid">
                    {FEATURES
                        .iter()
                        .map(|feature| {
                            view! {
                                <div class="feature-card">
                                    <div class="feature-icon">{feature.icon}</div>
                                    <h3 class="feature-title">{feature.title}</h3>
                                    <p class="feature-text">{feature.text}</p>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            <section class="notify" id="notify">
                <div class="notification-card">
                    <h2 class="section-title">"Be the first to know"</h2>
                    <p class="notification-text">
                        "Leave your email and we'll let you know the moment Celestia launches."
                    </p>
                    // Validation happens in the interactive layer
                    <form class="notification-form" id="notificationForm" novalidate=true>
                        <div class="input-wrapper">
                            <input
                                type="email"
                                class="notification-input"
                                placeholder="Enter your email"
                                autocomplete="email"
                                aria-label="Email address"
                            />
                        </div>
                        <button type="submit" class="notification-btn">"Notify Me"</button>
                    </form>
                </div>
            </section>
        </main>

        <footer class="footer">
            <p>"© 2025 Celestia. All rights reserved."</p>
        </footer>
    }
}

/// One numeric field of the countdown
#[component]
fn CountdownUnit(id: &'static str, label: &'static str, placeholder: &'static str) -> impl IntoView {
    view! {
        <div class="countdown-item">
            <span class="countdown-number" id=id>{placeholder}</span>
            <span class="countdown-label">{label}</span>
        </div>
    }
}
