use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;

use crate::api::{error_message, sign_in};
use crate::app::{AppContext, Session};
use crate::storage;

const INPUT_CLASS: &str = "w-full rounded-md border border-slate-700 bg-slate-900 px-3 py-2 text-sm text-slate-200 placeholder-slate-500 focus:outline-none focus:border-sky-500";

#[allow(non_snake_case)]
#[component]
pub fn SignInForm() -> Element {
    let mut ctx = use_context::<AppContext>();
    let mut uuid = use_signal(String::new);
    let mut remember_me = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let value = uuid.read().trim().to_string();
        if value.is_empty() {
            error.set(Some("Please enter your identifier.".to_string()));
            return;
        }
        busy.set(true);
        spawn(async move {
            match sign_in(value.clone()).await {
                Ok(user) => {
                    info!("[sign_in] signed in as {}", user.login);
                    storage::remember(&value, *remember_me.peek());
                    error.set(None);
                    busy.set(false);
                    ctx.session.set(Some(Session {
                        uuid: value,
                        user,
                        initial_report: None,
                    }));
                }
                Err(e) => {
                    let message = error_message(&e);
                    warn!("[sign_in] rejected: {}", message);
                    error.set(Some(message));
                    busy.set(false);
                }
            }
        });
    };

    rsx! {
        form { class: "max-w-md space-y-3", onsubmit,
            label { class: "block space-y-1",
                span { class: "text-sm text-slate-300", "Identifier" }
                input {
                    class: INPUT_CLASS,
                    r#type: "text",
                    autocomplete: "off",
                    placeholder: "Your personal identifier",
                    value: "{uuid}",
                    oninput: move |evt: FormEvent| uuid.set(evt.value()),
                }
            }
            if let Some(message) = error() {
                p { class: "text-sm text-red-300", "{message}" }
            }
            label { class: "flex items-center gap-2 text-sm text-slate-300",
                input {
                    r#type: "checkbox",
                    checked: remember_me(),
                    onchange: move |evt: FormEvent| remember_me.set(evt.checked()),
                }
                "Remember me"
            }
            div { class: "flex items-center gap-4",
                button {
                    class: "rounded-md bg-sky-600 px-4 py-2 text-sm font-medium text-white hover:bg-sky-500 disabled:opacity-50",
                    r#type: "submit",
                    disabled: busy(),
                    "Sign in"
                }
                button {
                    class: "text-sm text-sky-400 hover:underline",
                    r#type: "button",
                    onclick: move |_| ctx.sign_up_open.set(true),
                    "No identifier yet? Sign up"
                }
            }
        }
    }
}
