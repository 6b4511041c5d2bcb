#[cfg(test)]
mod tests {
    use crate::core::input::KeyInput;
    use crate::core::renderer::{Rect, Renderer, Target, TimeField};
    use crate::core::runtime::{Celestia, PageElements};
    use crate::core::scheduler::Millis;
    use crate::core::settings::{LandingSettings, parse_instant};
    use crate::core::signup::{SignupPhase, SubmitOutcome};
    use crate::core::testing::RecordingRenderer;
    use crate::core::theme::{MemoryStorage, Theme, ThemeStorage};
    use crate::core::validation::EmailError;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    // ========================================================================
    // Helpers
    // ========================================================================

    const T0: Millis = 1_700_000_000_000;

    fn quiet_settings() -> LandingSettings {
        let mut settings = LandingSettings::default();
        settings.launch_at = "2100-01-01T00:00:00Z".to_string();
        settings.effects.move_sparkle_probability = 0.0;
        settings
    }

    fn app(settings: LandingSettings) -> Celestia<MemoryStorage, SmallRng> {
        Celestia::new(settings, MemoryStorage::default(), SmallRng::seed_from_u64(42)).unwrap()
    }

    fn renderer() -> RecordingRenderer {
        let mut renderer = RecordingRenderer::new(1280.0, 800.0);
        renderer.set_text(Target::SignupButton, "Notify Me");
        renderer
    }

    fn page(renderer: &mut RecordingRenderer) -> PageElements {
        PageElements {
            feature_cards: (0..3).map(|_| renderer.register("feature-card")).collect(),
            notification_cards: vec![renderer.register("notification-card")],
        }
    }

    fn started(settings: LandingSettings) -> (Celestia<MemoryStorage, SmallRng>, RecordingRenderer, PageElements) {
        let mut renderer = renderer();
        let page = page(&mut renderer);
        let mut app = app(settings);
        app.start(T0, &page, &mut renderer);
        (app, renderer, page)
    }

    /// Drive the queue in small steps so every task fires close to its due time
    fn advance(
        app: &mut Celestia<MemoryStorage, SmallRng>,
        renderer: &mut RecordingRenderer,
        from: Millis,
        to: Millis,
    ) {
        let mut now = from;
        while now < to {
            app.run_due(now, renderer);
            now += 50;
        }
        app.run_due(to, renderer);
    }

    fn count_class(renderer: &RecordingRenderer, parent: Target, class: &str) -> usize {
        renderer
            .children_of(parent)
            .into_iter()
            .filter(|node| renderer.class(*node) == class)
            .count()
    }

    fn field(renderer: &RecordingRenderer, field: TimeField) -> String {
        renderer.text(Target::CountdownField(field))
    }

    // ========================================================================
    // Countdown
    // ========================================================================

    #[test]
    fn test_countdown_final_second_then_launch() {
        let mut settings = quiet_settings();
        settings.launch_at = "2025-10-01T00:00:00".to_string();
        let now = parse_instant("2025-09-30T23:59:59").unwrap();

        let mut renderer = renderer();
        let page = page(&mut renderer);
        let mut app = app(settings);
        app.start(now, &page, &mut renderer);

        assert_eq!(field(&renderer, TimeField::Days), "000");
        assert_eq!(field(&renderer, TimeField::Hours), "00");
        assert_eq!(field(&renderer, TimeField::Minutes), "00");
        assert_eq!(field(&renderer, TimeField::Seconds), "01");

        app.run_due(now + 1_000, &mut renderer);
        assert!(app.countdown().is_launched());
        assert!(renderer.html(Target::Countdown).contains("LAUNCHED!"));

        // Launch display is written once and the countdown never resumes
        renderer.set_html(Target::Countdown, "kept");
        for step in 2..12 {
            app.run_due(now + step * 1_000, &mut renderer);
        }
        assert_eq!(renderer.html(Target::Countdown), "kept");
        assert_eq!(field(&renderer, TimeField::Seconds), "01");
    }

    #[test]
    fn test_countdown_past_target_launches_immediately() {
        let mut settings = quiet_settings();
        settings.launch_at = "2020-01-01T00:00:00Z".to_string();

        let (app, renderer, _) = started(settings);

        assert!(app.countdown().is_launched());
        assert!(renderer.html(Target::Countdown).contains("LAUNCHED!"));
        assert_eq!(field(&renderer, TimeField::Days), "");
    }

    #[test]
    fn test_countdown_ticks_every_second() {
        let (mut app, mut renderer, _) = started(quiet_settings());
        let first = field(&renderer, TimeField::Seconds);

        app.run_due(T0 + 999, &mut renderer);
        assert_eq!(field(&renderer, TimeField::Seconds), first);

        app.run_due(T0 + 1_000, &mut renderer);
        assert_ne!(field(&renderer, TimeField::Seconds), first);
    }

    // ========================================================================
    // Particles
    // ========================================================================

    #[test]
    fn test_particles_bounded_and_expired_on_time() {
        let (mut app, mut renderer, _) = started(quiet_settings());

        let mut now = T0;
        while now <= T0 + 120_000 {
            app.run_due(now, &mut renderer);

            let particles = app.particles();
            assert!(particles.len() <= 30, "{} particles at {now}", particles.len());
            assert!(particles.active().iter().all(|p| p.expires_at > now));
            assert_eq!(
                renderer.children_of(Target::ParticleContainer).len(),
                particles.len()
            );
            if now >= T0 + 40_000 {
                assert!(particles.len() <= 25);
            }
            now += 250;
        }
    }

    #[test]
    fn test_all_initial_particles_appear_within_startup_window() {
        let (mut app, mut renderer, _) = started(quiet_settings());
        assert!(app.particles().is_empty());

        app.run_due(T0 + 2_999, &mut renderer);

        assert_eq!(app.particles().len(), 30);
    }

    #[test]
    fn test_resize_pulls_particles_back() {
        let (mut app, mut renderer, _) = started(quiet_settings());
        app.run_due(T0 + 3_000, &mut renderer);

        renderer.viewport.width = 100.0;
        app.on_resize(&mut renderer);

        assert!(app.particles().active().iter().all(|p| p.spec.x_position <= 100.0));
    }

    // ========================================================================
    // Theme
    // ========================================================================

    #[test]
    fn test_theme_shortcut_toggles_and_recolors() {
        let (mut app, mut renderer, _) = started(quiet_settings());
        app.run_due(T0 + 3_000, &mut renderer);
        assert_eq!(app.theme(), Theme::Dark);

        let key = KeyInput {
            key: "t".to_string(),
            ctrl: true,
            meta: false,
            in_text_input: false,
        };
        let now = T0 + 3_000;
        assert!(app.on_key(&key, now, &mut renderer));

        assert_eq!(app.theme(), Theme::Light);
        assert_eq!(renderer.class(Target::Body), "theme-light");
        assert_eq!(app.theme_store().storage().load().as_deref(), Some("light"));
        for particle in app.particles().active() {
            assert_eq!(renderer.style(particle.node, "background"), Some("#007AFF"));
        }

        app.run_due(now + 150, &mut renderer);
        assert_eq!(renderer.style(Target::ThemeToggle, "transform"), Some("scale(1)"));
        assert!(renderer.style(Target::Body, "transition").is_some());

        app.run_due(now + 300, &mut renderer);
        assert_eq!(renderer.style(Target::Body, "transition"), None);
    }

    #[test]
    fn test_persisted_theme_is_restored() {
        let mut renderer = renderer();
        let page = page(&mut renderer);
        let mut app = Celestia::new(
            quiet_settings(),
            MemoryStorage::with_value("light"),
            SmallRng::seed_from_u64(1),
        )
        .unwrap();

        app.start(T0, &page, &mut renderer);

        assert_eq!(app.theme(), Theme::Light);
        assert_eq!(renderer.class(Target::Body), "theme-light");
    }

    // ========================================================================
    // Mouse trail
    // ========================================================================

    #[test]
    fn test_trail_hides_one_second_after_last_move() {
        let (mut app, mut renderer, _) = started(quiet_settings());

        app.on_pointer_move(100.0, 100.0, T0, &mut renderer);
        app.on_pointer_move(200.0, 150.0, T0 + 500, &mut renderer);

        app.run_due(T0 + 1_400, &mut renderer);
        assert!(app.trail().is_visible());
        assert_eq!(renderer.style(Target::MouseTrail, "opacity"), Some("0.6"));

        app.run_due(T0 + 1_500, &mut renderer);
        assert!(!app.trail().is_visible());
        assert_eq!(renderer.style(Target::MouseTrail, "opacity"), Some("0"));
    }

    #[test]
    fn test_trail_eases_toward_pointer_each_frame() {
        let (mut app, mut renderer, _) = started(quiet_settings());
        app.on_pointer_move(100.0, 0.0, T0, &mut renderer);

        let (x, _) = app.on_frame(&mut renderer);
        assert!((x - 10.0).abs() < 1e-9);
        let (x, _) = app.on_frame(&mut renderer);
        assert!((x - 19.0).abs() < 1e-9);
    }

    #[test]
    fn test_pointer_sparkles_are_removed() {
        let mut settings = quiet_settings();
        settings.effects.move_sparkle_probability = 1.0;
        let (mut app, mut renderer, _) = started(settings);

        app.on_pointer_move(10.0, 20.0, T0, &mut renderer);
        assert_eq!(count_class(&renderer, Target::Body, "sparkle"), 1);

        app.run_due(T0 + 799, &mut renderer);
        assert_eq!(count_class(&renderer, Target::Body, "sparkle"), 1);
        app.run_due(T0 + 800, &mut renderer);
        assert_eq!(count_class(&renderer, Target::Body, "sparkle"), 0);
    }

    // ========================================================================
    // Effects
    // ========================================================================

    #[test]
    fn test_space_burst_staggers_and_cleans_up() {
        let (mut app, mut renderer, _) = started(quiet_settings());
        let now = T0 + 4_000;
        advance(&mut app, &mut renderer, T0, now);
        assert_eq!(count_class(&renderer, Target::Body, "sparkle"), 0);
        let space = KeyInput {
            key: " ".to_string(),
            ctrl: false,
            meta: false,
            in_text_input: false,
        };

        assert!(app.on_key(&space, now, &mut renderer));
        app.run_due(now, &mut renderer);
        assert_eq!(count_class(&renderer, Target::Body, "sparkle"), 1);

        app.run_due(now + 700, &mut renderer);
        assert_eq!(count_class(&renderer, Target::Body, "sparkle"), 8);

        app.run_due(now + 1_000, &mut renderer);
        assert_eq!(count_class(&renderer, Target::Body, "sparkle"), 7);

        app.run_due(now + 1_700, &mut renderer);
        assert_eq!(count_class(&renderer, Target::Body, "sparkle"), 0);
    }

    #[test]
    fn test_space_in_input_is_not_a_shortcut() {
        let (mut app, mut renderer, _) = started(quiet_settings());
        let space = KeyInput {
            key: " ".to_string(),
            ctrl: false,
            meta: false,
            in_text_input: true,
        };

        assert!(!app.on_key(&space, T0, &mut renderer));
        app.run_due(T0 + 1_000, &mut renderer);
        assert_eq!(count_class(&renderer, Target::Body, "sparkle"), 0);
    }

    #[test]
    fn test_card_glow_fades_in_and_out() {
        let (mut app, mut renderer, page) = started(quiet_settings());
        let card = page.feature_cards[0];

        app.on_card_enter(card, T0, &mut renderer);
        let glow = renderer.children_of(Target::Node(card))[0];
        assert_eq!(renderer.style(glow, "opacity"), Some("0"));

        app.run_due(T0 + 10, &mut renderer);
        assert_eq!(renderer.style(glow, "opacity"), Some("1"));

        app.on_card_leave(card, T0 + 50, &mut renderer);
        assert_eq!(renderer.style(glow, "opacity"), Some("0"));
        app.run_due(T0 + 349, &mut renderer);
        assert!(renderer.is_alive(glow));
        app.run_due(T0 + 350, &mut renderer);
        assert!(!renderer.is_alive(glow));
    }

    #[test]
    fn test_quick_hover_never_shows_glow() {
        let (mut app, mut renderer, page) = started(quiet_settings());
        let card = page.feature_cards[1];

        app.on_card_enter(card, T0, &mut renderer);
        let glow = renderer.children_of(Target::Node(card))[0];
        app.on_card_leave(card, T0 + 5, &mut renderer);
        app.run_due(T0 + 10, &mut renderer);

        assert_eq!(renderer.style(glow, "opacity"), Some("0"));
    }

    #[test]
    fn test_ripple_removed_after_animation() {
        let (mut app, mut renderer, _) = started(quiet_settings());
        renderer.bounds.insert(
            Target::ThemeToggle,
            Rect {
                left: 10.0,
                top: 10.0,
                width: 44.0,
                height: 44.0,
            },
        );

        app.on_button_click(Target::ThemeToggle, 32.0, 32.0, T0, &mut renderer);
        let ripple = renderer.children_of(Target::ThemeToggle)[0];
        assert_eq!(renderer.style(ripple, "left"), Some("0px"));
        // The toggle keeps its fixed placement from the stylesheet
        assert_eq!(renderer.style(Target::ThemeToggle, "position"), None);

        app.run_due(T0 + 599, &mut renderer);
        assert!(renderer.is_alive(ripple));
        app.run_due(T0 + 600, &mut renderer);
        assert!(!renderer.is_alive(ripple));
    }

    // ========================================================================
    // Page entrance
    // ========================================================================

    #[test]
    fn test_body_fades_in_and_welcome_burst_plays() {
        let (mut app, mut renderer, _) = started(quiet_settings());
        assert_eq!(renderer.style(Target::Body, "opacity"), None);

        app.run_due(T0 + 100, &mut renderer);
        assert_eq!(renderer.style(Target::Body, "opacity"), Some("1"));

        advance(&mut app, &mut renderer, T0 + 100, T0 + 1_999);
        assert_eq!(count_class(&renderer, Target::Body, "sparkle"), 0);
        advance(&mut app, &mut renderer, T0 + 1_999, T0 + 2_700);
        assert_eq!(count_class(&renderer, Target::Body, "sparkle"), 8);
        advance(&mut app, &mut renderer, T0 + 2_700, T0 + 3_700);
        assert_eq!(count_class(&renderer, Target::Body, "sparkle"), 0);
    }

    #[test]
    fn test_cards_staggered_and_revealed_once() {
        let (mut app, mut renderer, page) = started(quiet_settings());

        let delays: Vec<_> = page
            .feature_cards
            .iter()
            .map(|card| renderer.style(*card, "animation-delay").unwrap().to_string())
            .collect();
        assert_eq!(delays, vec!["0ms", "100ms", "200ms"]);

        let card = page.feature_cards[2];
        assert_eq!(renderer.style(card, "transform"), Some("translateY(40px)"));
        let section = page.notification_cards[0];
        assert_eq!(renderer.style(section, "transform"), Some("translateY(30px)"));

        assert!(app.on_intersection(card, true, &mut renderer));
        assert!(!app.on_intersection(card, true, &mut renderer));
        assert!(app.reveal().is_revealed(card));
    }

    #[test]
    fn test_scroll_parallax() {
        let (mut app, mut renderer, _) = started(quiet_settings());
        app.on_scroll(100.0, &mut renderer);

        assert_eq!(renderer.style(Target::Hero, "transform"), Some("translateY(-50px)"));
        assert_eq!(renderer.style(Target::Features, "transform"), Some("translateY(10px)"));
    }

    #[test]
    fn test_start_twice_is_noop() {
        let (mut app, mut renderer, page) = started(quiet_settings());
        let pending = app.pending_tasks();

        app.start(T0 + 10, &page, &mut renderer);

        assert_eq!(app.pending_tasks(), pending);
    }

    // ========================================================================
    // Signup
    // ========================================================================

    #[test]
    fn test_signup_timeline() {
        let (mut app, mut renderer, _) = started(quiet_settings());
        let now = T0 + 10_000;
        advance(&mut app, &mut renderer, T0, now);
        renderer.set_value(Target::SignupInput, "user@example.com");

        assert_eq!(
            app.on_submit("user@example.com", now, &mut renderer),
            SubmitOutcome::Started
        );
        assert_eq!(renderer.text(Target::SignupButton), "Subscribing...");
        assert_eq!(renderer.attribute(Target::SignupButton, "disabled"), Some(""));

        app.run_due(now + 1_499, &mut renderer);
        assert_eq!(renderer.text(Target::SignupButton), "Subscribing...");

        app.run_due(now + 1_500, &mut renderer);
        assert_eq!(renderer.text(Target::SignupButton), "✓ Subscribed!");
        assert_eq!(app.signup().phase(), &SignupPhase::Succeeded);
        let toasts = count_class(&renderer, Target::Body, "toast");
        assert_eq!(toasts, 1);
        assert_eq!(count_class(&renderer, Target::Body, "sparkle"), 1);

        app.run_due(now + 4_499, &mut renderer);
        assert_eq!(renderer.text(Target::SignupButton), "✓ Subscribed!");

        app.run_due(now + 4_500, &mut renderer);
        assert_eq!(renderer.text(Target::SignupButton), "Notify Me");
        assert_eq!(renderer.attribute(Target::SignupButton, "disabled"), None);
        assert_eq!(renderer.value(Target::SignupInput), "");
        assert_eq!(app.signup().phase(), &SignupPhase::Idle);
        assert_eq!(count_class(&renderer, Target::Body, "toast"), 1);

        app.run_due(now + 4_800, &mut renderer);
        assert_eq!(count_class(&renderer, Target::Body, "toast"), 0);
    }

    #[test]
    fn test_invalid_signup_schedules_nothing() {
        let (mut app, mut renderer, _) = started(quiet_settings());
        let pending = app.pending_tasks();

        assert_eq!(
            app.on_submit("user@", T0, &mut renderer),
            SubmitOutcome::Rejected(EmailError::EmptyDomain)
        );
        assert_eq!(app.pending_tasks(), pending);
        assert_eq!(renderer.text(Target::SignupButton), "Notify Me");
    }

    #[test]
    fn test_double_submit_is_ignored() {
        let (mut app, mut renderer, _) = started(quiet_settings());

        app.on_submit("a@b.co", T0, &mut renderer);
        assert_eq!(app.on_submit("a@b.co", T0 + 100, &mut renderer), SubmitOutcome::Busy);

        app.run_due(T0 + 1_500, &mut renderer);
        assert_eq!(count_class(&renderer, Target::Body, "toast"), 1);
    }

    #[test]
    fn test_input_focus_scales_wrapper() {
        let (mut app, mut renderer, _) = started(quiet_settings());
        app.on_input_focus(true, &mut renderer);
        assert_eq!(
            renderer.style(Target::SignupInputWrapper, "transform"),
            Some("scale(1.02)")
        );
    }
}
