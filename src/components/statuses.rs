use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

use crate::api::{error_message, job_statuses};
use crate::app::use_settled;
use crate::charts::series::{status_segments, status_summary};
use crate::components::{Card, HalfDonut, Pending, WidgetError};
use crate::shared::types::StatusesData;
use crate::utils::format::{format_number, render_co2e, render_cost};

fn summary_sentence(data: &StatusesData) -> String {
    let s = status_summary(data);
    format!(
        "Failed jobs emitted {} CO2e and cost {}, {:.1}% of the overall footprint. \
         {:.1}% of them ran for an hour or more, accounting for {:.1}% of the footprint.",
        render_co2e(data.exit.co2e),
        render_cost(data.exit.cost),
        s.failed_co2e_pct,
        s.more1h_pct,
        s.more1h_co2e_pct,
    )
}

#[allow(non_snake_case)]
#[component]
pub fn JobStatuses() -> Element {
    let statuses = use_resource(|| async move { job_statuses().await });
    use_settled(statuses);

    rsx! {
        Card {
            id: "status".to_string(),
            title: "Job statuses".to_string(),
            {
                match &*statuses.read_unchecked() {
                    None => rsx! { Pending {} },
                    Some(Err(e)) => {
                        let message = error_message(e);
                        warn!("[statuses] fetch failed: {}", message);
                        rsx! { WidgetError { message } }
                    }
                    Some(Ok(dto)) => {
                        let total = status_summary(&dto.data).total_jobs;
                        rsx! {
                            p { class: "text-sm text-slate-400",
                                "{format_number(total as f64)} jobs ended in the last {dto.meta.days} days."
                            }
                            div { class: "flex flex-col items-center gap-4 md:flex-row",
                                HalfDonut { segments: status_segments(&dto.data) }
                                p { class: "text-sm text-slate-300", "{summary_sentence(&dto.data)}" }
                            }
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
    use crate::shared::types::{DoneStats, ExitStats};

    #[test]
    fn empty_statuses_read_as_zero_percent() {
        let text = summary_sentence(&StatusesData::default());
        assert!(text.contains("0.0% of the overall footprint"));
        assert!(text.contains("0.0% of them ran"));
    }

    #[test]
    fn percentages_use_the_overall_footprint() {
        let data = StatusesData {
            done: DoneStats { total: 6, co2e: 3_000.0 },
            exit: ExitStats {
                total: 4,
                co2e: 1_000.0,
                cost: 50.0,
                memlim: 1,
                more1h: 1,
                more1h_co2e: 500.0,
            },
        };
        let text = summary_sentence(&data);
        assert!(text.starts_with("Failed jobs emitted 1 kg CO2e and cost £50, 25.0%"));
        assert!(text.contains("25.0% of them ran"));
        assert!(text.contains("12.5% of the footprint"));
    }
}
