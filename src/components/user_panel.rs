use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

use crate::api::{error_message, user_footprint};
use crate::app::{AppContext, Session};
use crate::charts::series::{memory_bucket_columns, usage_series};
use crate::charts::Segment;
use crate::components::{
    use_sync_group, Card, ColumnChart, HalfDonut, Pending, SignInForm, Stat, TeamFootprints,
    TimeSeriesChart, UserReport, ValueFormat, WidgetError,
};
use crate::utils::format::{format_number, render_co2e, render_cost};

const DEFAULT_AVATAR: Asset = asset!("/assets/avatar.svg");

/// Report preselected from the URL, if the user actually has it.
fn initial_report(session: &Session) -> Option<String> {
    let wanted = session.initial_report.as_deref()?;
    session
        .user
        .reports
        .iter()
        .find(|(id, _)| id == wanted)
        .map(|(id, _)| id.clone())
}

#[allow(non_snake_case)]
#[component]
pub fn UserPanel() -> Element {
    let ctx = use_context::<AppContext>();
    let session = ctx.session.read().clone();

    rsx! {
        Card {
            id: "details".to_string(),
            title: "Your footprint".to_string(),
            {
                match session {
                    None => rsx! {
                        p { class: "text-sm text-slate-400",
                            "Sign in to see the footprint of your own jobs and of your teams."
                        }
                        SignInForm {}
                    },
                    Some(session) => rsx! {
                        UserDetails { key: "{session.uuid}", session }
                    },
                }
            }
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn UserDetails(session: Session) -> Element {
    let mut ctx = use_context::<AppContext>();
    let uuid = session.uuid.clone();
    let footprint = use_resource(move || {
        let uuid = uuid.clone();
        async move { user_footprint(uuid).await }
    });
    let start = initial_report(&session);
    let mut report = use_signal(move || start);
    let group = use_sync_group(2);

    let user = &session.user;
    let photo = user.photo_url.clone().unwrap_or_else(|| DEFAULT_AVATAR.to_string());
    let overlay = ctx.overlay_team.read().clone().unwrap_or_default();
    let selected = report().unwrap_or_default();
    let display_name = user.display_name();

    rsx! {
        div { class: "flex items-center gap-4",
            img { class: "h-16 w-16 rounded-full border border-slate-700 object-cover", src: "{photo}", alt: "" }
            div { class: "flex-1",
                div { class: "text-lg font-semibold text-slate-100", "{display_name}" }
                if let Some(position) = &user.position {
                    div { class: "text-sm text-slate-400", "{position}" }
                }
            }
            button {
                class: "rounded-md border border-slate-700 px-3 py-1.5 text-sm text-slate-300 hover:bg-slate-800",
                onclick: move |_| ctx.sign_out(),
                "Sign out"
            }
        }
        {
            match &*footprint.read_unchecked() {
                None => rsx! { Pending {} },
                Some(Err(e)) => {
                    let message = error_message(e);
                    warn!("[user] footprint failed: {}", message);
                    rsx! { WidgetError { message } }
                }
                Some(Ok(dto)) => {
                    let data = &dto.data;
                    let (cores, memory, unit) = usage_series(&data.activity);
                    let (bucket_labels, buckets) = memory_bucket_columns(&data.memory);
                    let statuses = vec![
                        Segment::new("Done", "#21ba45", data.done as f64),
                        Segment::new("Failed", "#db2828", data.exit as f64),
                    ];
                    rsx! {
                        p { class: "text-sm text-slate-400", "Past {dto.meta.days} days" }
                        div { class: "grid gap-3 sm:grid-cols-3",
                            Stat { label: "Jobs".to_string(), value: format_number(data.jobs) }
                            Stat { label: "CO2e".to_string(), value: render_co2e(data.co2e) }
                            Stat { label: "Cost".to_string(), value: render_cost(data.cost) }
                        }
                        TimeSeriesChart {
                            series: vec![cores],
                            title: "Cores".to_string(),
                            y_title: "Cores".to_string(),
                            sync: group.clone(),
                            index: 0,
                        }
                        TimeSeriesChart {
                            series: vec![memory],
                            title: "Memory".to_string(),
                            y_title: format!("Memory ({unit})"),
                            format: ValueFormat::Memory(unit),
                            sync: group.clone(),
                            index: 1,
                        }
                        div { class: "grid items-center gap-6 md:grid-cols-2",
                            div { class: "space-y-1",
                                h3 { class: "text-sm font-medium text-slate-300", "Memory efficiency" }
                                ColumnChart {
                                    categories: bucket_labels,
                                    series: vec![buckets],
                                    height: 220.0,
                                    y_title: "Jobs".to_string(),
                                }
                            }
                            HalfDonut { segments: statuses }
                        }
                    }
                }
            }
        }
        if !user.teams.is_empty() {
            label { class: "flex items-center gap-3 text-sm text-slate-300",
                "Show a team on the cluster activity charts:"
                select {
                    class: "rounded-md border border-slate-700 bg-slate-900 px-2 py-1 text-sm",
                    value: "{overlay}",
                    onchange: move |evt: FormEvent| {
                        let team = evt.value();
                        ctx.overlay_team.set(if team.is_empty() { None } else { Some(team) });
                    },
                    option { value: "", "None" }
                    for team in user.teams.iter() {
                        option { key: "{team}", value: "{team}", "{team}" }
                    }
                }
            }
        }
        if !user.reports.is_empty() {
            label { class: "flex items-center gap-3 text-sm text-slate-300",
                "Monthly report:"
                select {
                    class: "rounded-md border border-slate-700 bg-slate-900 px-2 py-1 text-sm",
                    value: "{selected}",
                    onchange: move |evt: FormEvent| {
                        let id = evt.value();
                        report.set(if id.is_empty() { None } else { Some(id) });
                    },
                    option { value: "", "Choose a month" }
                    for (id, label) in user.reports.iter() {
                        option { key: "{id}", value: "{id}", "{label}" }
                    }
                }
            }
        }
        if let Some(month) = report() {
            UserReport { key: "{month}", uuid: session.uuid.clone(), month }
        }
        if !user.teams.is_empty() {
            TeamFootprints { uuid: session.uuid.clone(), login: user.login.clone(), teams: user.teams.clone() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::UserDto;

    fn session(initial: Option<&str>) -> Session {
        Session {
            uuid: "abc123".to_string(),
            user: UserDto {
                login: "jdoe".to_string(),
                name: None,
                teams: vec![],
                position: None,
                photo_url: None,
                reports: vec![("2023-01".to_string(), "January 2023".to_string())],
            },
            initial_report: initial.map(str::to_string),
        }
    }

    #[test]
    fn url_report_is_kept_only_when_known() {
        assert_eq!(initial_report(&session(Some("2023-01"))).as_deref(), Some("2023-01"));
        assert_eq!(initial_report(&session(Some("1999-12"))), None);
        assert_eq!(initial_report(&session(None)), None);
    }
}
