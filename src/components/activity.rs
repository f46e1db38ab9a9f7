use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

use crate::api::{error_message, recent_activity, team_activity};
use crate::app::{use_settled, AppContext};
use crate::charts::series::{
    activity_markers, activity_points, overlay_points, ActivityKind, DEFAULT_COLOR, OVERLAY_COLOR,
};
use crate::charts::Series;
use crate::components::{use_sync_group, Card, Pending, Stat, TimeSeriesChart, ValueFormat, WidgetError};
use crate::utils::format::{
    format_number, render_co2e, render_cost, render_cpu_time, round, LONDON_TO_TOKYO_G,
    TREE_YEAR_G,
};

fn value_format(kind: ActivityKind) -> ValueFormat {
    match kind {
        ActivityKind::Memory => ValueFormat::Decimals(3, kind.suffix()),
        _ => ValueFormat::Integer,
    }
}

#[allow(non_snake_case)]
#[component]
pub fn RecentActivity() -> Element {
    let ctx = use_context::<AppContext>();
    let activity = use_resource(|| async move { recent_activity().await });
    use_settled(activity);

    // Activity of the team picked in the user panel, if any
    let overlay = use_resource(move || {
        let team = ctx.overlay_team.read().clone();
        let uuid = ctx.session.read().as_ref().map(|s| s.uuid.clone());
        async move {
            match (uuid, team) {
                (Some(uuid), Some(team)) => match team_activity(uuid, team.clone()).await {
                    Ok(dto) => Some((team, dto)),
                    Err(e) => {
                        warn!("[activity] overlay for {} failed: {}", team, error_message(&e));
                        None
                    }
                },
                _ => None,
            }
        }
    });

    let group = use_sync_group(ActivityKind::ALL.len());

    rsx! {
        Card {
            id: "activity".to_string(),
            title: "Recent activity".to_string(),
            {
                match &*activity.read_unchecked() {
                    None => rsx! { Pending {} },
                    Some(Err(e)) => {
                        let message = error_message(e);
                        warn!("[activity] fetch failed: {}", message);
                        rsx! { WidgetError { message } }
                    }
                    Some(Ok(dto)) => {
                        let data = &dto.data;
                        let flights = format_number(round(data.co2e / LONDON_TO_TOKYO_G, 1));
                        let trees = format_number(round(data.co2e / TREE_YEAR_G, 1));
                        let overlay_v = overlay.read();
                        let overlay_dto = overlay_v.as_ref().and_then(|o| o.as_ref());
                        let charts: Vec<(usize, ActivityKind, Vec<Series>, Vec<(f64, f64, String)>)> = ActivityKind::ALL
                            .into_iter()
                            .enumerate()
                            .map(|(i, kind)| {
                                let mut series = vec![Series::new(
                                    kind.title(),
                                    DEFAULT_COLOR,
                                    activity_points(&data.activity, kind),
                                )];
                                if let (Some((team, team_dto)), false) = (overlay_dto, kind == ActivityKind::Jobs) {
                                    series.push(Series::new(
                                        team.clone(),
                                        OVERLAY_COLOR,
                                        overlay_points(&team_dto.data.activity, kind),
                                    ));
                                }
                                let markers = data
                                    .events
                                    .get(kind.key())
                                    .map(|events| activity_markers(events, kind))
                                    .unwrap_or_default();
                                (i, kind, series, markers)
                            })
                            .collect();
                        rsx! {
                            p { class: "text-sm text-slate-400", "Over the last {dto.meta.days} days, jobs on the cluster used:" }
                            div { class: "grid gap-3 sm:grid-cols-2 lg:grid-cols-4",
                                Stat { label: "CPU time".to_string(), value: render_cpu_time(data.cputime) }
                                Stat { label: "CO2e".to_string(), value: render_co2e(data.co2e) }
                                Stat { label: "Cost".to_string(), value: render_cost(data.cost) }
                                Stat { label: "Flights London to Tokyo".to_string(), value: flights }
                            }
                            p { class: "text-xs text-slate-400",
                                "Absorbing this much CO2 would take a mature tree {trees} years."
                            }
                            for (i, kind, series, markers) in charts.into_iter() {
                                TimeSeriesChart {
                                    key: "{i}",
                                    series,
                                    title: kind.title().to_string(),
                                    y_title: kind.axis_title().to_string(),
                                    markers,
                                    format: value_format(kind),
                                    sync: group.clone(),
                                    index: i,
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
