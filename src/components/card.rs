use dioxus::prelude::*;

/// Dashboard section frame.
#[allow(non_snake_case)]
#[component]
pub fn Card(
    #[props(default)] id: String,
    title: String,
    #[props(default)] subtitle: String,
    children: Element,
) -> Element {
    rsx! {
        section {
            id: "{id}",
            class: "w-full rounded-2xl border border-slate-800 bg-slate-900/60 backdrop-blur-sm shadow-xl p-6 space-y-4",
            div { class: "space-y-1",
                h2 { class: "text-lg font-semibold tracking-tight text-slate-200", "{title}" }
                if !subtitle.is_empty() {
                    p { class: "text-xs text-slate-400", "{subtitle}" }
                }
            }
            {children}
        }
    }
}

#[allow(non_snake_case)]
#[component]
pub fn Pending() -> Element {
    rsx! {
        div { class: "h-24 animate-pulse rounded-xl bg-slate-800/60" }
    }
}

#[allow(non_snake_case)]
#[component]
pub fn WidgetError(message: String) -> Element {
    rsx! {
        p { class: "text-sm text-red-300", "Could not load this section: {message}" }
    }
}

/// Label and value pair used in statistic rows.
#[allow(non_snake_case)]
#[component]
pub fn Stat(label: String, value: String) -> Element {
    rsx! {
        div { class: "rounded-xl border border-slate-800 bg-slate-950/40 px-4 py-3",
            div { class: "text-xs uppercase tracking-wide text-slate-400", "{label}" }
            div { class: "text-xl font-semibold text-slate-100", "{value}" }
        }
    }
}
