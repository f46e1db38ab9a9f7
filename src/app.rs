use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;

use crate::api::{error_message, service_info, sign_in};
use crate::components::{
    CpuDistribution, JobStatuses, MemoryDistribution, MonthlyOverview, RecentActivity, Runtimes,
    SignUpModal, TeamsFootprint, UserPanel,
};
use crate::shared::types::{ServiceInfoDto, UserDto};
use crate::storage;
use crate::utils::validate::is_valid_uuid;
use crate::{FAVICON, TAILWIND_CSS};

/// Widgets mounted on the dashboard; the loader stays up until all settled.
pub const WIDGET_COUNT: usize = 7;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub uuid: String,
    pub user: UserDto,
    /// Report to open right after sign-in.
    pub initial_report: Option<String>,
}

/// Application-wide state, created once in `App` and shared through context.
#[derive(Clone, Copy)]
pub struct AppContext {
    pub session: Signal<Option<Session>>,
    pub sign_up_open: Signal<bool>,
    /// Team whose activity is overlaid on the cluster activity charts.
    pub overlay_team: Signal<Option<String>>,
    pub settled: Signal<usize>,
    pub signup_domain: Signal<Option<String>>,
}

impl AppContext {
    pub fn sign_out(mut self) {
        storage::clear();
        self.session.set(None);
        self.overlay_team.set(None);
    }
}

/// Counts `resource` as settled the first time it resolves, success or not.
pub fn use_settled<T: 'static>(resource: Resource<T>) {
    let mut ctx = use_context::<AppContext>();
    let mut counted = use_signal(|| false);
    use_effect(move || {
        if resource.read().is_some() && !*counted.peek() {
            counted.set(true);
            *ctx.settled.write() += 1;
        }
    });
}

#[allow(non_snake_case)]
#[component]
pub fn App() -> Element {
    use_context_provider(|| AppContext {
        session: Signal::new(None),
        sign_up_open: Signal::new(false),
        overlay_team: Signal::new(None),
        settled: Signal::new(0),
        signup_domain: Signal::new(None),
    });

    let info = use_resource(|| async move { service_info().await });

    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Stylesheet { href: TAILWIND_CSS }
        document::Meta { name: "theme-color", content: "#020618" } // slate-950
        document::Meta { name: "color-scheme", content: "dark" }
        div { class: "min-h-screen bg-slate-950 text-slate-100",
            header { class: "border-b border-slate-800 bg-slate-900/60",
                div { class: "mx-auto flex max-w-6xl items-center justify-between gap-4 px-6 py-4",
                    h1 { class: "text-xl font-semibold tracking-tight text-slate-200", "HPC carbon footprint" }
                    nav { class: "flex flex-wrap gap-4 text-sm text-slate-400",
                        a { href: "#overview", "Overview" }
                        a { href: "#activity", "Activity" }
                        a { href: "#teams", "Teams" }
                        a { href: "#efficiency", "Efficiency" }
                        a { href: "#status", "Job statuses" }
                        a { href: "#details", "Your footprint" }
                    }
                }
            }
            main { class: "mx-auto max-w-6xl space-y-6 p-6",
                {
                    match &*info.read_unchecked() {
                        None => rsx! {
                            LoaderBanner { text: "Connecting to the footprint service...".to_string() }
                        },
                        Some(Err(e)) => {
                            warn!("[app] service unavailable: {}", error_message(e));
                            rsx! { Unavailable {} }
                        }
                        Some(Ok(service)) => rsx! {
                            Dashboard { service: service.clone() }
                        },
                    }
                }
            }
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn Unavailable() -> Element {
    rsx! {
        div { class: "rounded-2xl border border-red-900 bg-red-950/40 p-6 space-y-2",
            h2 { class: "text-lg font-semibold text-red-300", "Service temporarily unavailable" }
            p { class: "text-sm text-slate-300",
                "The REST API could not be reached. Please try again later, and if the problem persists, contact us."
            }
        }
    }
}

#[allow(non_snake_case)]
#[component]
pub fn LoaderBanner(text: String) -> Element {
    rsx! {
        div { class: "flex items-center gap-3 rounded-xl border border-slate-800 bg-slate-900/60 px-4 py-3 text-sm text-slate-300",
            div { class: "h-3 w-3 animate-pulse rounded-full bg-sky-400" }
            "{text}"
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn Dashboard(service: ServiceInfoDto) -> Element {
    let mut ctx = use_context::<AppContext>();

    let domain = service.signup_email_domain.clone();
    use_hook(move || ctx.signup_domain.set(domain));

    // Restore a previous sign-in once the API is known to be up
    use_effect(move || {
        let Some(uuid) = storage::restore() else {
            return;
        };
        if !is_valid_uuid(&uuid) {
            warn!("[app] discarding stored identifier in an old format");
            ctx.sign_out();
            return;
        }
        let mut session = ctx.session;
        spawn(async move {
            match sign_in(uuid.clone()).await {
                Ok(user) => {
                    info!("[app] restored session for {}", user.login);
                    session.set(Some(Session {
                        uuid,
                        user,
                        initial_report: storage::report_param(),
                    }));
                }
                Err(e) => warn!("[app] stored sign-in rejected: {}", error_message(&e)),
            }
        });
    });

    let loading = *ctx.settled.read() < WIDGET_COUNT;
    let docs_label = service
        .docs_url
        .split_once("//")
        .map(|(_, rest)| rest)
        .unwrap_or(&service.docs_url)
        .trim_end_matches('/')
        .to_string();

    rsx! {
        if loading {
            LoaderBanner { text: "Loading the latest figures...".to_string() }
        }
        MonthlyOverview {}
        RecentActivity {}
        TeamsFootprint {}
        section { id: "efficiency", class: "grid gap-6 lg:grid-cols-2",
            MemoryDistribution {}
            CpuDistribution {}
        }
        Runtimes {}
        JobStatuses {}
        UserPanel {}
        SignUpModal {}
        footer { class: "border-t border-slate-800 pt-4 text-xs text-slate-400 space-y-1",
            p { "Data last updated: {service.updated}" }
            p {
                "Questions? Contact us at "
                a { class: "text-sky-400", href: "mailto:{service.contact_email}", "{service.contact_email}" }
                if let Some(slack) = &service.contact_slack {
                    " or on "
                    a { class: "text-sky-400", href: "{slack}", "Slack" }
                }
                "."
            }
            p {
                "API documentation: "
                a { class: "text-sky-400", href: "{service.docs_url}", "{docs_label}" }
            }
        }
    }
}
