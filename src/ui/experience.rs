//! Browser driver of the landing page
//!
//! Builds the [`Celestia`] context once the page is hydrated, keeps a single
//! timeout armed for the earliest due task, runs the trail from
//! `requestAnimationFrame` and forwards DOM events into the context.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::logging::{error, log, warn};
use leptos::web_sys;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, EventTarget, HtmlInputElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, MouseEvent,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::core::input::{KeyInput, NO_CONTEXT_MENU_SELECTOR, anchor_target};
use crate::core::renderer::Target;
use crate::core::runtime::{Celestia, PageElements};
use crate::core::scheduler::Millis;
use crate::core::settings::{LandingSettings, SETTINGS_META_NAME};
use crate::core::signup::SubmitOutcome;
use crate::ui::dom::{DomRenderer, MountError};
use crate::ui::theme::LocalStorageTheme;

type Runtime = Celestia<LocalStorageTheme, SmallRng>;

const STARTUP_BANNER: &str = "\
🌟 CELESTIA 🌟

✨ Interactive Features:
• Light/Dark mode toggle (click the toggle or press Ctrl/Cmd+T)
• Press Space for sparkle effects
• Hover over feature cards for glow effects
• Mouse trail and particle system
• Smooth countdown timer

Enjoy the experience! 🚀";

fn now() -> Millis {
    js_sys::Date::now() as Millis
}

struct Experience {
    app: RefCell<Runtime>,
    renderer: RefCell<DomRenderer>,
    timer: RefCell<Option<Timeout>>,
    /// Timeout whose callback is running; dropped on the next fire
    spent: RefCell<Option<Timeout>>,
    armed_for: Cell<Option<Millis>>,
}

impl Experience {
    /// Run `f` against the context, fire whatever became due and re-arm the timer
    fn dispatch<T>(self: &Rc<Self>, f: impl FnOnce(&mut Runtime, &mut DomRenderer, Millis) -> T) -> T {
        let result = {
            let mut app = self.app.borrow_mut();
            let mut renderer = self.renderer.borrow_mut();
            let now = now();
            let result = f(&mut *app, &mut *renderer, now);
            app.run_due(now, &mut *renderer);
            result
        };
        self.rearm();
        result
    }

    fn rearm(self: &Rc<Self>) {
        let next = self.app.borrow().next_due();
        if next == self.armed_for.get() {
            return;
        }
        self.armed_for.set(next);

        let Some(due) = next else {
            self.timer.borrow_mut().take();
            return;
        };
        // Browsers fire longer timeouts immediately
        let delay = due.saturating_sub(now()).clamp(0, i32::MAX as Millis) as u32;
        let this = Rc::clone(self);
        let timeout = Timeout::new(delay, move || this.on_timer());
        *self.timer.borrow_mut() = Some(timeout);
    }

    fn on_timer(self: &Rc<Self>) {
        let fired = self.timer.borrow_mut().take();
        *self.spent.borrow_mut() = fired;
        self.armed_for.set(None);
        self.dispatch(|_, _, _| ());
    }
}

/// Attach a listener for the lifetime of the page
fn listen<E>(target: &EventTarget, event: &str, handler: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn event_element(event: &web_sys::Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Settings embedded by the server, or the defaults
fn read_settings(document: &Document) -> LandingSettings {
    let selector = format!("meta[name=\"{SETTINGS_META_NAME}\"]");
    let content = document
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|meta| meta.get_attribute("content"));
    let Some(content) = content else {
        warn!("no {SETTINGS_META_NAME} meta tag, using default settings");
        return LandingSettings::default();
    };
    LandingSettings::from_json(&content).unwrap_or_else(|err| {
        warn!("{err}, using default settings");
        LandingSettings::default()
    })
}

/// Wire the interactive layer onto the rendered landing page
pub fn mount_experience() -> Result<(), MountError> {
    let mut renderer = DomRenderer::mount()?;
    let document = renderer.document().clone();
    let window = renderer.window().clone();
    let form = document
        .get_element_by_id("notificationForm")
        .ok_or(MountError::MissingElement("#notificationForm"))?;

    let settings = read_settings(&document);
    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let mut app = Celestia::new(settings, LocalStorageTheme, SmallRng::seed_from_u64(seed))?;

    let page = PageElements {
        feature_cards: renderer.register_all(".feature-card"),
        notification_cards: renderer.register_all(".notification-card"),
    };
    app.start(now(), &page, &mut renderer);

    let experience = Rc::new(Experience {
        app: RefCell::new(app),
        renderer: RefCell::new(renderer),
        timer: RefCell::new(None),
        spent: RefCell::new(None),
        armed_for: Cell::new(None),
    });
    experience.rearm();

    start_frame_loop(&experience);
    bind_document(&experience, &document);
    bind_window(&experience, &window);
    bind_controls(&experience, &form);
    bind_cards(&experience, &page);
    observe_reveals(&experience, &page);

    log!("{STARTUP_BANNER}");
    Ok(())
}

fn start_frame_loop(experience: &Rc<Experience>) {
    let frame = Rc::new(RefCell::new(None::<Closure<dyn FnMut()>>));
    let next_frame = Rc::clone(&frame);
    let experience = Rc::clone(experience);

    let animate = move || {
        {
            let mut app = experience.app.borrow_mut();
            let mut renderer = experience.renderer.borrow_mut();
            app.on_frame(&mut *renderer);
        }

        if let Some(window) = web_sys::window() {
            let closure = next_frame.borrow();
            if let Some(closure) = closure.as_ref() {
                let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
            }
        }
    };

    let closure = Closure::new(animate);
    if let Some(window) = web_sys::window() {
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    }
    // Kept alive by the loop itself for the page lifetime
    *frame.borrow_mut() = Some(closure);
}

fn bind_document(experience: &Rc<Experience>, document: &Document) {
    let exp = Rc::clone(experience);
    listen(document, "keydown", move |e: KeyboardEvent| {
        let in_text_input = event_element(&e).is_some_and(|el| el.tag_name() == "INPUT");
        let input = KeyInput {
            key: e.key(),
            ctrl: e.ctrl_key(),
            meta: e.meta_key(),
            in_text_input,
        };
        if exp.dispatch(|app, r, now| app.on_key(&input, now, r)) {
            e.prevent_default();
        }
    });

    let exp = Rc::clone(experience);
    listen(document, "mousemove", move |e: MouseEvent| {
        let (x, y) = (e.client_x() as f64, e.client_y() as f64);
        exp.dispatch(|app, r, now| app.on_pointer_move(x, y, now, r));
    });

    listen(document, "contextmenu", |e: MouseEvent| {
        let protected = event_element(&e)
            .and_then(|el| el.closest(NO_CONTEXT_MENU_SELECTOR).ok().flatten())
            .is_some();
        if protected {
            e.prevent_default();
        }
    });

    let scroll_document = document.clone();
    listen(document, "click", move |e: MouseEvent| {
        let Some(link) = event_element(&e).filter(|el| el.tag_name() == "A") else {
            return;
        };
        let href = link.get_attribute("href").unwrap_or_default();
        let Some(id) = anchor_target(&href) else {
            return;
        };
        e.prevent_default();
        if let Some(target) = scroll_document.get_element_by_id(id) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        }
    });
}

fn bind_window(experience: &Rc<Experience>, window: &web_sys::Window) {
    let exp = Rc::clone(experience);
    listen(window, "resize", move |_: web_sys::Event| {
        exp.dispatch(|app, r, _| app.on_resize(r));
    });

    let exp = Rc::clone(experience);
    listen(window, "scroll", move |_: web_sys::Event| {
        exp.dispatch(|app, r, _| {
            let scroll_y = r.scroll_y();
            app.on_scroll(scroll_y, r);
        });
    });
}

fn bind_controls(experience: &Rc<Experience>, form: &Element) {
    let (toggle, button, input) = {
        let renderer = experience.renderer.borrow();
        (
            renderer.element(Target::ThemeToggle).cloned(),
            renderer.element(Target::SignupButton).cloned(),
            renderer.element(Target::SignupInput).cloned(),
        )
    };

    if let Some(toggle) = toggle {
        let exp = Rc::clone(experience);
        listen(&toggle, "click", move |e: MouseEvent| {
            let (x, y) = (e.client_x() as f64, e.client_y() as f64);
            exp.dispatch(|app, r, now| {
                app.on_button_click(Target::ThemeToggle, x, y, now, r);
                app.toggle_theme(now, r);
            });
        });
    }

    if let Some(button) = button {
        let exp = Rc::clone(experience);
        listen(&button, "click", move |e: MouseEvent| {
            let (x, y) = (e.client_x() as f64, e.client_y() as f64);
            exp.dispatch(|app, r, now| app.on_button_click(Target::SignupButton, x, y, now, r));
        });
    }

    let exp = Rc::clone(experience);
    listen(form, "submit", move |e: web_sys::Event| {
        e.prevent_default();
        let outcome = exp.dispatch(|app, r, now| {
            let raw = r
                .element(Target::SignupInput)
                .and_then(|el| el.dyn_ref::<HtmlInputElement>())
                .map(|input| input.value())
                .unwrap_or_default();
            app.on_submit(&raw, now, r)
        });
        if let SubmitOutcome::Rejected(err) = outcome {
            error!("{}: {err}", err.user_message());
        }
    });

    if let Some(input) = input {
        for (event, focused) in [("focus", true), ("blur", false)] {
            let exp = Rc::clone(experience);
            listen(&input, event, move |_: web_sys::Event| {
                exp.dispatch(|app, r, _| app.on_input_focus(focused, r));
            });
        }
    }
}

fn bind_cards(experience: &Rc<Experience>, page: &PageElements) {
    for card in page.feature_cards.iter().copied() {
        let element = experience.renderer.borrow().element(Target::Node(card)).cloned();
        let Some(element) = element else {
            continue;
        };

        let exp = Rc::clone(experience);
        listen(&element, "mouseenter", move |_: MouseEvent| {
            exp.dispatch(|app, r, now| app.on_card_enter(card, now, r));
        });

        let exp = Rc::clone(experience);
        listen(&element, "mouseleave", move |_: MouseEvent| {
            exp.dispatch(|app, r, now| app.on_card_leave(card, now, r));
        });
    }
}

fn observe_reveals(experience: &Rc<Experience>, page: &PageElements) {
    let settings = experience.app.borrow().reveal().settings().clone();
    let observed: Vec<_> = page
        .feature_cards
        .iter()
        .chain(&page.notification_cards)
        .copied()
        .collect();

    let exp = Rc::clone(experience);
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let node = exp.renderer.borrow().node_of(&target);
                let Some(node) = node else {
                    continue;
                };
                let intersecting = entry.is_intersecting();
                if exp.dispatch(|app, r, _| app.on_intersection(node, intersecting, r)) {
                    observer.unobserve(&target);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(settings.threshold));
    options.set_root_margin(&settings.root_margin);

    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => {
            let renderer = experience.renderer.borrow();
            for node in observed {
                if let Some(element) = renderer.element(Target::Node(node)) {
                    observer.observe(element);
                }
            }
            callback.forget();
        }
        Err(_) => {
            warn!("IntersectionObserver unavailable, revealing everything");
            experience.dispatch(|app, r, _| {
                for node in observed {
                    app.on_intersection(node, true, r);
                }
            });
        }
    }
}
