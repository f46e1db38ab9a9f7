use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

use crate::api::{error_message, user_report};
use crate::charts::series::memory_bucket_columns;
use crate::components::{ColumnChart, Pending, Stat, WidgetError};
use crate::shared::types::UserReportData;
use crate::utils::format::{
    format_number, ordinal_suffix, render_co2e, render_cost, render_report_share, render_team_share,
};

/// `(team, CO2e, cost, share)` rows of the report's team table.
fn team_rows(report: &UserReportData) -> Vec<(String, String, String, String)> {
    // total the user's contribution was computed against
    let overall = (report.contribution > 0.0).then(|| report.co2e / report.contribution);
    report
        .teams
        .iter()
        .map(|t| {
            (
                t.name.clone(),
                render_co2e(t.co2e),
                render_cost(t.cost),
                render_team_share(t.co2e, overall),
            )
        })
        .collect()
}

#[allow(non_snake_case)]
#[component]
pub fn UserReport(uuid: String, month: String) -> Element {
    let report = use_resource(move || {
        let (uuid, month) = (uuid.clone(), month.clone());
        async move { user_report(uuid, month).await }
    });

    rsx! {
        div { class: "space-y-4 rounded-xl border border-slate-800 bg-slate-950/40 p-4",
            {
                match &*report.read_unchecked() {
                    None => rsx! { Pending {} },
                    Some(Err(e)) => {
                        let message = error_message(e);
                        warn!("[report] fetch failed: {}", message);
                        rsx! { WidgetError { message } }
                    }
                    Some(Ok(dto)) => {
                        let data = &dto.data;
                        let rows = team_rows(data);
                        let (bucket_labels, buckets) = memory_bucket_columns(&data.memory);
                        rsx! {
                            h3 { class: "text-base font-semibold text-slate-200", "Report for {dto.meta.month}" }
                            p { class: "text-sm text-slate-300",
                                "You were the {data.rank}{ordinal_suffix(data.rank)} largest emitter, "
                                "contributing {render_report_share(data.contribution)}% of the cluster footprint."
                            }
                            div { class: "grid gap-3 sm:grid-cols-3",
                                Stat { label: "Jobs".to_string(), value: format_number(data.jobs.total as f64) }
                                Stat { label: "CO2e".to_string(), value: render_co2e(data.co2e) }
                                Stat { label: "Cost".to_string(), value: render_cost(data.cost) }
                            }
                            table { class: "data-table w-full text-sm",
                                thead {
                                    tr {
                                        th { "Team" }
                                        th { "CO2e" }
                                        th { "Cost" }
                                        th { "Contribution" }
                                    }
                                }
                                tbody {
                                    if rows.is_empty() {
                                        tr {
                                            td { colspan: "4", class: "text-center text-slate-400", "No data" }
                                        }
                                    }
                                    for (name, co2e, cost, share) in rows.into_iter() {
                                        tr { key: "{name}",
                                            td { "{name}" }
                                            td { "{co2e}" }
                                            td { "{cost}" }
                                            td { "{share}" }
                                        }
                                    }
                                }
                            }
                            h4 { class: "text-sm font-medium text-slate-300", "Memory efficiency" }
                            ColumnChart {
                                categories: bucket_labels,
                                series: vec![buckets],
                                height: 200.0,
                                y_title: "Jobs".to_string(),
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
    use crate::shared::types::TeamCost;

    fn report(contribution: f64) -> UserReportData {
        UserReportData {
            rank: 2,
            contribution,
            co2e: 2_000.0,
            cost: 10.0,
            teams: vec![TeamCost {
                name: "Research".to_string(),
                co2e: 1_500.0,
                cost: 8.0,
            }],
            ..UserReportData::default()
        }
    }

    #[test]
    fn team_share_uses_the_implied_cluster_total() {
        // 2 kg at 10% means 20 kg overall
        let rows = team_rows(&report(0.1));
        assert_eq!(rows[0].0, "Research");
        assert_eq!(rows[0].3, "7.50%");
    }

    #[test]
    fn team_share_is_unknown_without_a_contribution() {
        let rows = team_rows(&report(0.0));
        assert_eq!(rows[0].3, "N/A");
    }
}
