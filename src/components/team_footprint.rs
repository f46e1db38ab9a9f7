use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

use crate::api::{error_message, team_activity};
use crate::charts::series::{member_series, team_members, MemberFootprint};
use crate::components::{DataTable, Pending, TimeSeriesChart, ValueFormat, WidgetError};
use crate::table::{Column, Record};
use crate::utils::format::{render_co2e, render_contribution, render_cost};
use crate::utils::validate::team_anchor;

fn member_columns(total: f64) -> Vec<Column> {
    vec![
        Column::new("Login", "login"),
        Column::new("Name", "name"),
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

fn member_records(members: &[MemberFootprint]) -> Vec<Record> {
    members
        .iter()
        .map(|m| {
            Record::new()
                .with("login", m.login.as_str())
                .with("name", m.name.clone())
                .with("co2e", m.co2e)
                .with("cost", m.cost)
        })
        .collect()
}

/// One tab per team of the signed-in user.
#[allow(non_snake_case)]
#[component]
pub fn TeamFootprints(uuid: String, login: String, teams: Vec<String>) -> Element {
    let first = teams.first().cloned();
    let mut active = use_signal(move || first);
    let current = active().unwrap_or_default();
    let tabs: Vec<(String, &'static str)> = teams
        .iter()
        .map(|t| (t.clone(), if *t == current { "tab active" } else { "tab" }))
        .collect();

    rsx! {
        div { class: "space-y-3",
            h3 { class: "text-base font-semibold text-slate-200", "Your teams" }
            ul { class: "flex flex-wrap gap-2 border-b border-slate-800 text-sm",
                for (team, class) in tabs.into_iter() {
                    li { key: "{team}",
                        a {
                            href: "#{team_anchor(&team)}",
                            class: "{class}",
                            onclick: {
                                let team = team.clone();
                                move |evt: MouseEvent| {
                                    evt.prevent_default();
                                    active.set(Some(team.clone()));
                                }
                            },
                            "{team}"
                        }
                    }
                }
            }
            if !current.is_empty() {
                TeamTab {
                    key: "{current}",
                    uuid: uuid.clone(),
                    login: login.clone(),
                    team: current.clone(),
                }
            }
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn TeamTab(uuid: String, login: String, team: String) -> Element {
    let anchor = team_anchor(&team);
    let activity = use_resource(move || {
        let (uuid, team) = (uuid.clone(), team.clone());
        async move { team_activity(uuid, team).await }
    });

    rsx! {
        div { id: "{anchor}", class: "space-y-4",
            {
                match &*activity.read_unchecked() {
                    None => rsx! { Pending {} },
                    Some(Err(e)) => {
                        let message = error_message(e);
                        warn!("[team] fetch failed: {}", message);
                        rsx! { WidgetError { message } }
                    }
                    Some(Ok(dto)) => {
                        let (members, total) = team_members(dto, &login);
                        let series = member_series(dto, &members, &login);
                        rsx! {
                            p { class: "text-sm text-slate-400", "Last {dto.meta.days} days." }
                            TimeSeriesChart {
                                series,
                                title: "Daily CO2e".to_string(),
                                y_title: "kg CO2e".to_string(),
                                height: 280.0,
                                stacked: true,
                                format: ValueFormat::Decimals(1, " kg"),
                            }
                            DataTable {
                                columns: member_columns(total),
                                records: member_records(&members),
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

    fn member(login: &str, name: Option<&str>, co2e: f64) -> MemberFootprint {
        MemberFootprint {
            login: login.to_string(),
            name: name.map(str::to_string),
            co2e,
            cost: 0.5,
        }
    }

    #[test]
    fn members_without_a_name_sort_last_and_stay_searchable_by_login() {
        let members = vec![member("zed", None, 10.0), member("amy", Some("Amy Pond"), 5.0)];
        let mut state = TableState::new(member_columns(15.0), member_records(&members), TableOptions {
            order_by: Some(1),
            order_dir: Some(SortDirection::Asc),
        });
        assert_eq!(state.page_rows()[0][0], "amy");
        assert_eq!(state.page_rows()[1][1], "");

        state.search("ZED");
        assert_eq!(state.visible_len(), 1);
        assert_eq!(state.page_rows()[0][4], "66.67%");
    }
}
