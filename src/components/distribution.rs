use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

use crate::api::{cpu_distribution, error_message, memory_distribution, runtime_distribution};
use crate::app::use_settled;
use crate::charts::series::{percent_categories, DEFAULT_COLOR};
use crate::charts::CategorySeries;
use crate::components::{AxisLabels, Card, ColumnChart, Pending, Stat, WidgetError};
use crate::utils::format::{decode_entities, format_number, render_co2e, render_cost};

fn jobs_series(counts: &[u64]) -> CategorySeries {
    CategorySeries::new("Jobs", DEFAULT_COLOR, counts.iter().map(|c| *c as f64).collect())
}

#[allow(non_snake_case)]
#[component]
pub fn MemoryDistribution() -> Element {
    let dist = use_resource(|| async move { memory_distribution().await });
    use_settled(dist);

    rsx! {
        Card {
            title: "Memory efficiency".to_string(),
            subtitle: "Memory used relative to memory requested, per job.".to_string(),
            {
                match &*dist.read_unchecked() {
                    None => rsx! { Pending {} },
                    Some(Err(e)) => {
                        let message = error_message(e);
                        warn!("[memory] fetch failed: {}", message);
                        rsx! { WidgetError { message } }
                    }
                    Some(Ok(dto)) => {
                        let jobs: u64 = dto.data.dist.iter().sum();
                        rsx! {
                            p { class: "text-sm text-slate-400",
                                "{format_number(jobs as f64)} jobs completed in the last {dto.meta.days} days."
                            }
                            div { class: "grid gap-3 sm:grid-cols-2",
                                Stat { label: "Wasted CO2e".to_string(), value: render_co2e(dto.data.wasted.co2e) }
                                Stat { label: "Wasted cost".to_string(), value: render_cost(dto.data.wasted.cost) }
                            }
                            ColumnChart {
                                categories: percent_categories(dto.data.dist.len()),
                                series: vec![jobs_series(&dto.data.dist)],
                                height: 240.0,
                                y_title: "Jobs".to_string(),
                                x_title: "Memory efficiency (%)".to_string(),
                                label_step: 10,
                                labels: AxisLabels::Millions,
                                tooltip_prefix: "Efficiency: ".to_string(),
                                percent_buckets: true,
                            }
                        }
                    }
                }
            }
        }
    }
}

#[allow(non_snake_case)]
#[component]
pub fn CpuDistribution() -> Element {
    let dist = use_resource(|| async move { cpu_distribution().await });
    use_settled(dist);

    rsx! {
        Card {
            title: "CPU efficiency".to_string(),
            subtitle: "CPU time relative to the cores reserved, per job.".to_string(),
            {
                match &*dist.read_unchecked() {
                    None => rsx! { Pending {} },
                    Some(Err(e)) => {
                        let message = error_message(e);
                        warn!("[cpu] fetch failed: {}", message);
                        rsx! { WidgetError { message } }
                    }
                    Some(Ok(dto)) => rsx! {
                        p { class: "text-sm text-slate-400", "Last {dto.meta.days} days." }
                        ColumnChart {
                            categories: percent_categories(dto.data.dist.len()),
                            series: vec![jobs_series(&dto.data.dist)],
                            height: 240.0,
                            y_title: "Jobs".to_string(),
                            x_title: "CPU efficiency (%)".to_string(),
                            label_step: 10,
                            labels: AxisLabels::Millions,
                            tooltip_prefix: "Efficiency: ".to_string(),
                            percent_buckets: true,
                        }
                    },
                }
            }
        }
    }
}

#[allow(non_snake_case)]
#[component]
pub fn Runtimes() -> Element {
    let dist = use_resource(|| async move { runtime_distribution().await });
    use_settled(dist);

    rsx! {
        Card {
            id: "runtimes".to_string(),
            title: "Job runtimes".to_string(),
            {
                match &*dist.read_unchecked() {
                    None => rsx! { Pending {} },
                    Some(Err(e)) => {
                        let message = error_message(e);
                        warn!("[runtimes] fetch failed: {}", message);
                        rsx! { WidgetError { message } }
                    }
                    Some(Ok(dto)) => {
                        let categories: Vec<String> = dto.data.dist.iter().map(|(label, _)| decode_entities(label)).collect();
                        let counts: Vec<u64> = dto.data.dist.iter().map(|(_, n)| *n).collect();
                        rsx! {
                            p { class: "text-sm text-slate-400", "Completed jobs by runtime, last {dto.meta.days} days." }
                            ColumnChart {
                                categories,
                                series: vec![jobs_series(&counts)],
                                height: 260.0,
                                y_title: "Jobs".to_string(),
                                labels: AxisLabels::Millions,
                                tooltip_prefix: "Runtime: ".to_string(),
                            }
                        }
                    }
                }
            }
        }
    }
}
