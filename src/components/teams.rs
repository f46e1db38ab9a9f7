use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

use crate::api::{error_message, teams_footprint};
use crate::app::use_settled;
use crate::charts::series::{contributor_columns, daily_team_series, main_contributors};
use crate::components::{
    Card, ColumnChart, ColumnValue, DataTable, Pending, TimeSeriesChart, ValueFormat, WidgetError,
};
use crate::shared::types::TeamTotal;
use crate::table::{Column, Record};
use crate::utils::format::{render_co2e, render_contribution, render_cost};

/// Teams charted on their own; the rest is "Others".
pub const TOP_TEAMS: usize = 15;

fn team_columns(total: f64) -> Vec<Column> {
    vec![
        Column::new("Team", "name"),
        Column::new("CO2e", "co2e")
            .searchable(false)
            .render(|v, _| v.as_f64().map(render_co2e).unwrap_or_default()),
        Column::new("Cost", "cost")
            .searchable(false)
            .render(|v, _| v.as_f64().map(render_cost).unwrap_or_default()),
        Column::new("Contribution", "co2e")
            .searchable(false)
            .render(move |v, _| {
                v.as_f64()
                    .map(|co2e| render_contribution(co2e, total))
                    .unwrap_or_default()
            }),
    ]
}

fn team_records(teams: &[TeamTotal]) -> Vec<Record> {
    teams
        .iter()
        .map(|t| {
            Record::new()
                .with("name", t.name.as_str())
                .with("co2e", t.co2e)
                .with("cost", t.cost)
        })
        .collect()
}

#[allow(non_snake_case)]
#[component]
pub fn TeamsFootprint() -> Element {
    let footprint = use_resource(|| async move { teams_footprint().await });
    use_settled(footprint);

    rsx! {
        Card {
            id: "teams".to_string(),
            title: "Footprint per team".to_string(),
            {
                match &*footprint.read_unchecked() {
                    None => rsx! { Pending {} },
                    Some(Err(e)) => {
                        let message = error_message(e);
                        warn!("[teams] fetch failed: {}", message);
                        rsx! { WidgetError { message } }
                    }
                    Some(Ok(dto)) => {
                        let teams = &dto.data.teams;
                        let total: f64 = teams.iter().map(|t| t.co2e).sum();
                        let (categories, columns) = contributor_columns(teams, TOP_TEAMS);
                        let daily = daily_team_series(&dto.data.activity, &main_contributors(teams, TOP_TEAMS));
                        rsx! {
                            p { class: "text-sm text-slate-400", "Last {dto.meta.days} days." }
                            ColumnChart {
                                categories,
                                series: vec![columns],
                                y_title: "Tonnes CO2e".to_string(),
                                value: ColumnValue::Tonnes,
                            }
                            TimeSeriesChart {
                                series: daily,
                                title: "Daily CO2e".to_string(),
                                y_title: "kg CO2e".to_string(),
                                height: 300.0,
                                stacked: true,
                                format: ValueFormat::Decimals(1, " kg"),
                            }
                            DataTable {
                                columns: team_columns(total),
                                records: team_records(teams),
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
    use crate::table::{SortDirection, TableOptions, TableState};

    fn team(name: &str, co2e: f64) -> TeamTotal {
        TeamTotal {
            name: name.to_string(),
            co2e,
            cost: co2e / 100.0,
            cputime: 0.0,
        }
    }

    #[test]
    fn team_table_starts_in_name_order() {
        let teams = vec![team("gamma", 2_000.0), team("beta", 6_000.0), team("alpha", 2_000.0)];
        let mut state = TableState::new(team_columns(10_000.0), team_records(&teams), TableOptions::default());
        let rows = state.page_rows();
        assert_eq!(rows[0][0], "alpha");
        assert_eq!(rows[1], vec!["beta", "6 kg", "£60", "60.00%"]);

        state.click_header(1);
        state.click_header(1);
        assert_eq!(state.sort_direction(), SortDirection::Desc);
        assert_eq!(state.page_rows()[0][0], "beta");
    }

    #[test]
    fn numeric_columns_are_not_searched() {
        let teams = vec![team("alpha", 2_000.0), team("beta", 6_000.0)];
        let mut state = TableState::new(team_columns(8_000.0), team_records(&teams), TableOptions::default());
        state.search("6");
        assert!(state.is_empty());
        state.search("alp");
        assert_eq!(state.visible_len(), 1);
    }
}
