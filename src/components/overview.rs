use std::collections::BTreeSet;

use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

use crate::api::{error_message, monthly_footprint};
use crate::app::use_settled;
use crate::charts::series::monthly_team_series;
use crate::components::{Card, ColumnChart, ColumnValue, Pending, WidgetError};

/// Teams shown on their own before the slider is touched.
pub const DEFAULT_SERIES: usize = 10;

#[allow(non_snake_case)]
#[component]
pub fn MonthlyOverview() -> Element {
    let footprint = use_resource(|| async move { monthly_footprint().await });
    use_settled(footprint);
    let mut n_series = use_signal(|| DEFAULT_SERIES);

    rsx! {
        Card {
            id: "overview".to_string(),
            title: "Monthly carbon footprint".to_string(),
            {
                match &*footprint.read_unchecked() {
                    None => rsx! { Pending {} },
                    Some(Err(e)) => {
                        let message = error_message(e);
                        warn!("[overview] fetch failed: {}", message);
                        rsx! { WidgetError { message } }
                    }
                    Some(Ok(dto)) => {
                        let team_count = dto
                            .data
                            .iter()
                            .flat_map(|m| m.footprint.iter().map(|t| t.team.as_str()))
                            .collect::<BTreeSet<_>>()
                            .len();
                        let shown = (*n_series.read()).min(team_count);
                        let (categories, series) = monthly_team_series(&dto.data, shown);
                        rsx! {
                            p { class: "text-sm text-slate-400",
                                "CO2-equivalent emissions of the cluster over the last {dto.meta.months} months."
                            }
                            label { class: "flex items-center gap-3 text-sm text-slate-300",
                                "Teams shown separately: {shown}"
                                input {
                                    r#type: "range",
                                    class: "w-48 accent-sky-500",
                                    min: "0",
                                    max: "{team_count}",
                                    value: "{shown}",
                                    oninput: move |evt: FormEvent| {
                                        n_series.set(evt.value().parse().unwrap_or(DEFAULT_SERIES));
                                    },
                                }
                            }
                            ColumnChart {
                                categories,
                                series,
                                stacked: true,
                                height: 360.0,
                                y_title: "Tonnes CO2-equivalent".to_string(),
                                value: ColumnValue::Tonnes,
                                legend: true,
                            }
                        }
                    }
                }
            }
        }
    }
}
