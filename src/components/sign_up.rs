use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;

use crate::api::{error_message, sign_up};
use crate::app::AppContext;
use crate::utils::validate::is_valid_signup_email;

/// Seconds before the modal closes itself after a successful sign-up.
pub const CLOSE_COUNTDOWN_SECS: u32 = 5;

fn email_hint(domain: Option<&str>) -> String {
    match domain {
        Some(domain) => format!("Please use your @{domain} address."),
        None => "Please enter a valid e-mail address.".to_string(),
    }
}

#[allow(non_snake_case)]
#[component]
pub fn SignUpModal() -> Element {
    let mut ctx = use_context::<AppContext>();
    let mut email = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut confirmed = use_signal(|| Option::<String>::None);
    let mut countdown = use_signal(|| 0u32);

    #[cfg(feature = "web")]
    let mut ticker: Signal<Option<gloo_timers::callback::Interval>> = use_signal(|| None);

    #[cfg(feature = "web")]
    use_drop(move || {
        if let Some(t) = ticker.write().take() {
            t.cancel();
        }
    });

    // Stop ticking once the countdown is over; never from inside the tick
    #[cfg(feature = "web")]
    use_effect(move || {
        if countdown() == 0 {
            if let Some(t) = ticker.write().take() {
                t.cancel();
            }
        }
    });

    let mut close = move || {
        ctx.sign_up_open.set(false);
        countdown.set(0);
        email.set(String::new());
        error.set(None);
        confirmed.set(None);
    };

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let value = email.read().trim().to_lowercase();
        let domain = ctx.signup_domain.peek().clone();
        if !is_valid_signup_email(&value, domain.as_deref()) {
            error.set(Some(email_hint(domain.as_deref())));
            return;
        }
        spawn(async move {
            match sign_up(value).await {
                Ok(dto) => {
                    info!("[sign_up] identifier sent to {}", dto.email);
                    error.set(None);
                    confirmed.set(Some(dto.email));
                    countdown.set(CLOSE_COUNTDOWN_SECS);
                    #[cfg(feature = "web")]
                    {
                        use gloo_timers::callback::Interval;

                        if let Some(prev) = ticker.write().take() {
                            prev.cancel();
                        }
                        let handle = Interval::new(1_000, move || {
                            let left = countdown.peek().saturating_sub(1);
                            if left == 0 {
                                close();
                            } else {
                                countdown.set(left);
                            }
                        });
                        ticker.set(Some(handle));
                    }
                    #[cfg(not(feature = "web"))]
                    close();
                }
                Err(e) => {
                    let message = error_message(&e);
                    warn!("[sign_up] rejected: {}", message);
                    error.set(Some(message));
                }
            }
        });
    };

    if !*ctx.sign_up_open.read() {
        return rsx! {};
    }
    let submitted = confirmed().is_some();
    let hint = email_hint(ctx.signup_domain.read().as_deref());

    rsx! {
        div { class: "fixed inset-0 z-50 flex items-center justify-center bg-black/60 p-4",
            div { class: "w-full max-w-md rounded-2xl border border-slate-800 bg-slate-900 p-6 shadow-xl space-y-4",
                h2 { class: "text-lg font-semibold text-slate-200", "Sign up" }
                form { class: "space-y-3", onsubmit,
                    input {
                        class: "w-full rounded-md border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-200 placeholder-slate-500 focus:outline-none focus:border-sky-500",
                        r#type: "email",
                        placeholder: "{hint}",
                        value: "{email}",
                        disabled: submitted,
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                    if let Some(message) = error() {
                        p { class: "text-sm text-red-300", "{message}" }
                    }
                    if let Some(address) = confirmed() {
                        p { class: "text-sm text-emerald-300",
                            "Your identifier is on its way to {address}. This window closes in {countdown} s."
                        }
                    }
                    div { class: "flex justify-end gap-3",
                        button {
                            class: "rounded-md px-4 py-2 text-sm text-slate-300 hover:bg-slate-800",
                            r#type: "button",
                            onclick: move |_| close(),
                            "Close"
                        }
                        button {
                            class: "rounded-md bg-sky-600 px-4 py-2 text-sm font-medium text-white hover:bg-sky-500 disabled:opacity-50",
                            r#type: "submit",
                            disabled: submitted,
                            "Sign up"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_names_the_required_domain() {
        assert_eq!(email_hint(Some("ebi.ac.uk")), "Please use your @ebi.ac.uk address.");
        assert_eq!(email_hint(None), "Please enter a valid e-mail address.");
    }
}
