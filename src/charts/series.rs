//! Reshaping of API payloads into chart series.

use std::collections::HashMap;

use crate::shared::types::{
    ActivityPoint, DailyTeamsPoint, EventMarker, MonthFootprint, StatusesData, TeamActivityDto,
    TeamTotal, UsagePoint,
};
use crate::utils::format::round;

pub const OTHERS_COLOR: &str = "#607d8b";
pub const OVERLAY_COLOR: &str = "#f44336";
pub const DEFAULT_COLOR: &str = "#0074e8";

const PALETTE: [&str; 10] = [
    "#7cb5ec", "#434348", "#90ed7d", "#f7a35c", "#8085e9", "#f15c80", "#e4d354", "#2b908f",
    "#f45b5b", "#91e8e1",
];

pub fn palette_color(i: usize) -> &'static str {
    PALETTE[i % PALETTE.len()]
}

/// `[timestamp, value]` series.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(name: impl Into<String>, color: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            points,
        }
    }
}

/// One value per category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySeries {
    pub name: String,
    pub color: String,
    pub values: Vec<f64>,
    /// Per-category colour overrides; empty means `color` everywhere.
    pub point_colors: Vec<String>,
}

impl CategorySeries {
    pub fn new(name: impl Into<String>, color: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            values,
            point_colors: Vec::new(),
        }
    }

    pub fn color_at(&self, i: usize) -> &str {
        self.point_colors
            .get(i)
            .map(String::as_str)
            .unwrap_or(&self.color)
    }
}

/// A named slice of a donut.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub name: String,
    pub color: String,
    pub value: f64,
}

impl Segment {
    pub fn new(name: &str, color: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            value,
        }
    }
}

/// Cumulative tops of stacked series sharing the same x positions.
pub fn stacked_tops(series: &[Series]) -> Vec<Vec<f64>> {
    let mut tops = Vec::with_capacity(series.len());
    let mut acc: Vec<f64> = Vec::new();
    for s in series {
        if acc.len() < s.points.len() {
            acc.resize(s.points.len(), 0.0);
        }
        for (i, (_, y)) in s.points.iter().enumerate() {
            acc[i] += y;
        }
        tops.push(acc[..s.points.len()].to_vec());
    }
    tops
}

/// Monthly CO2e (tonnes) per team, the `n_series` largest teams on their own
/// and the rest folded into one series.
pub fn monthly_team_series(
    months: &[MonthFootprint],
    n_series: usize,
) -> (Vec<String>, Vec<CategorySeries>) {
    let categories: Vec<String> = months.iter().map(|m| m.month.clone()).collect();

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut teams: Vec<(String, Vec<f64>, f64)> = Vec::new();
    for (i, month) in months.iter().enumerate() {
        for fp in &month.footprint {
            let slot = *index.entry(fp.team.as_str()).or_insert_with(|| {
                teams.push((fp.team.clone(), vec![0.0; months.len()], 0.0));
                teams.len() - 1
            });
            let team = &mut teams[slot];
            team.1[i] = fp.co2e / 1e6;
            team.2 += fp.co2e;
        }
    }
    teams.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

    let others_name = if n_series > 0 { "Others" } else { "All teams" };
    let mut others = CategorySeries::new(others_name, OTHERS_COLOR, vec![0.0; months.len()]);
    let mut series = Vec::new();
    for (i, (name, data, _)) in teams.into_iter().enumerate() {
        if i < n_series {
            series.push(CategorySeries::new(name, palette_color(i), data));
        } else {
            for (acc, v) in others.values.iter_mut().zip(data) {
                *acc += v;
            }
        }
    }
    series.push(others);
    (categories, series)
}

fn by_co2e_desc(teams: &[TeamTotal]) -> Vec<&TeamTotal> {
    let mut sorted: Vec<&TeamTotal> = teams.iter().collect();
    sorted.sort_by(|a, b| b.co2e.partial_cmp(&a.co2e).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Names of the `top` largest emitters.
pub fn main_contributors(teams: &[TeamTotal], top: usize) -> Vec<String> {
    by_co2e_desc(teams)
        .into_iter()
        .take(top)
        .map(|t| t.name.clone())
        .collect()
}

/// One column per main contributor plus "Others", in tonnes.
pub fn contributor_columns(teams: &[TeamTotal], top: usize) -> (Vec<String>, CategorySeries) {
    let sorted = by_co2e_desc(teams);
    let mut categories = Vec::new();
    let mut series = CategorySeries::new("CO2e", DEFAULT_COLOR, Vec::new());
    let mut others = 0.0;
    for (i, team) in sorted.iter().enumerate() {
        if i < top {
            categories.push(team.name.clone());
            series.values.push(team.co2e / 1e6);
            series.point_colors.push(palette_color(i).to_string());
        } else {
            others += team.co2e / 1e6;
        }
    }
    if sorted.len() > top {
        categories.push("Others".to_string());
        series.values.push(others);
        series.point_colors.push(OTHERS_COLOR.to_string());
    }
    (categories, series)
}

/// Daily stacked CO2e (kg) of the main contributors, everyone else summed.
pub fn daily_team_series(activity: &[DailyTeamsPoint], main: &[String]) -> Vec<Series> {
    let zeros = || -> Vec<(f64, f64)> {
        activity
            .iter()
            .map(|p| (p.timestamp as f64, 0.0))
            .collect()
    };
    let mut series: Vec<Series> = main
        .iter()
        .enumerate()
        .map(|(i, name)| Series::new(name.clone(), palette_color(i), zeros()))
        .collect();
    let mut others = Series::new("Others", OTHERS_COLOR, zeros());

    for (j, point) in activity.iter().enumerate() {
        for (team, co2e) in &point.teams {
            match main.iter().position(|m| m == team) {
                Some(i) => series[i].points[j].1 = co2e / 1e3,
                None => others.points[j].1 += co2e / 1e3,
            }
        }
    }
    series.push(others);
    series
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberFootprint {
    pub login: String,
    pub name: Option<String>,
    pub co2e: f64,
    pub cost: f64,
}

impl MemberFootprint {
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", name, self.login),
            None => self.login.clone(),
        }
    }
}

/// Team members with their footprint over the window, the signed-in user
/// first and then the largest emitters. Also returns the team total.
pub fn team_members(dto: &TeamActivityDto, current_login: &str) -> (Vec<MemberFootprint>, f64) {
    let mut members: Vec<MemberFootprint> = dto
        .meta
        .users
        .iter()
        .map(|(login, name)| MemberFootprint {
            login: login.clone(),
            name: name.clone(),
            co2e: 0.0,
            cost: 0.0,
        })
        .collect();
    let mut total = 0.0;
    for day in &dto.data.footprint {
        for (login, value) in &day.users {
            let slot = match members.iter().position(|m| &m.login == login) {
                Some(i) => i,
                None => {
                    members.push(MemberFootprint {
                        login: login.clone(),
                        name: None,
                        co2e: 0.0,
                        cost: 0.0,
                    });
                    members.len() - 1
                }
            };
            members[slot].co2e += value.co2e;
            members[slot].cost += value.cost;
            total += value.co2e;
        }
    }
    members.sort_by(|a, b| {
        if a.login == current_login {
            std::cmp::Ordering::Less
        } else if b.login == current_login {
            std::cmp::Ordering::Greater
        } else {
            b.co2e.partial_cmp(&a.co2e).unwrap_or(std::cmp::Ordering::Equal)
        }
    });
    (members, total)
}

pub const TOP_MEMBERS: usize = 10;

/// Daily stacked CO2e (kg) of the ten members shown on their own, with an
/// "Others" series when the team is larger than that.
pub fn member_series(
    dto: &TeamActivityDto,
    members: &[MemberFootprint],
    current_login: &str,
) -> Vec<Series> {
    let zeros = || -> Vec<(f64, f64)> {
        dto.data
            .footprint
            .iter()
            .map(|p| (p.timestamp as f64, 0.0))
            .collect()
    };
    let shown: Vec<&MemberFootprint> = members
        .iter()
        .filter(|m| m.login == current_login || m.co2e > 0.0)
        .take(TOP_MEMBERS)
        .collect();
    let mut series: Vec<Series> = shown
        .iter()
        .enumerate()
        .map(|(i, m)| Series::new(m.label(), palette_color(i), zeros()))
        .collect();
    let mut others = Series::new("Others", OTHERS_COLOR, zeros());

    for (j, day) in dto.data.footprint.iter().enumerate() {
        for (login, value) in &day.users {
            match shown.iter().position(|m| &m.login == login) {
                Some(i) => series[i].points[j].1 = value.co2e / 1e3,
                None => others.points[j].1 += value.co2e / 1e3,
            }
        }
    }
    if members.len() > TOP_MEMBERS {
        series.push(others);
    }
    series
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Jobs,
    Cores,
    Memory,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 3] = [ActivityKind::Jobs, ActivityKind::Cores, ActivityKind::Memory];

    pub fn key(self) -> &'static str {
        match self {
            ActivityKind::Jobs => "jobs",
            ActivityKind::Cores => "cores",
            ActivityKind::Memory => "memory",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ActivityKind::Jobs => "Submitted jobs",
            ActivityKind::Cores => "Cores",
            ActivityKind::Memory => "Memory",
        }
    }

    pub fn axis_title(self) -> &'static str {
        match self {
            ActivityKind::Jobs => "Jobs",
            ActivityKind::Cores => "Cores",
            ActivityKind::Memory => "Memory (TB)",
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            ActivityKind::Memory => " TB",
            _ => "",
        }
    }
}

/// Memory is reported in GB and charted in TB.
fn gb_to_tb(gb: f64) -> f64 {
    round(gb / 1024.0, 3)
}

pub fn activity_points(activity: &[ActivityPoint], kind: ActivityKind) -> Vec<(f64, f64)> {
    activity
        .iter()
        .map(|p| {
            let y = match kind {
                ActivityKind::Jobs => p.jobs.submitted,
                ActivityKind::Cores => p.cores,
                ActivityKind::Memory => gb_to_tb(p.memory),
            };
            (p.timestamp as f64, y)
        })
        .collect()
}

/// Annotation markers; memory markers come in GB.
pub fn activity_markers(events: &[EventMarker], kind: ActivityKind) -> Vec<(f64, f64, String)> {
    events
        .iter()
        .map(|e| {
            let y = match kind {
                ActivityKind::Memory => e.y / 1024.0,
                _ => e.y,
            };
            (e.x as f64, y, e.text.clone())
        })
        .collect()
}

/// Cores and memory of a team, for overlaying on the activity charts.
pub fn overlay_points(activity: &[UsagePoint], kind: ActivityKind) -> Vec<(f64, f64)> {
    activity
        .iter()
        .map(|p| {
            let y = match kind {
                ActivityKind::Memory => gb_to_tb(p.memory),
                _ => p.cores,
            };
            (p.timestamp as f64, y)
        })
        .collect()
}

/// Divisor and unit for a memory series in GB: TB once the peak reaches 1024.
pub fn memory_unit(activity: &[UsagePoint]) -> (f64, &'static str) {
    let peak = activity.iter().map(|p| p.memory).fold(f64::MIN, f64::max);
    if peak >= 1024.0 {
        (1024.0, "TB")
    } else {
        (1.0, "GB")
    }
}

pub fn usage_series(activity: &[UsagePoint]) -> (Series, Series, &'static str) {
    let (divisor, unit) = memory_unit(activity);
    let cores = activity
        .iter()
        .map(|p| (p.timestamp as f64, p.cores))
        .collect();
    let memory = activity
        .iter()
        .map(|p| (p.timestamp as f64, p.memory / divisor))
        .collect();
    (
        Series::new("Cores", "#34495E", cores),
        Series::new("Memory", "#3498DB", memory),
        unit,
    )
}

const MEMORY_BUCKETS: [(&str, &str); 5] = [
    ("0-20%", "#f44336"),
    ("20-40%", "#ff9800"),
    ("40-60%", "#cddc39"),
    ("60-80%", "#8bc34a"),
    ("80-100%", "#4caf50"),
];

/// Five 20%-wide memory-efficiency buckets; missing counts read as zero.
pub fn memory_bucket_columns(counts: &[u64]) -> (Vec<String>, CategorySeries) {
    let categories = MEMORY_BUCKETS.iter().map(|(l, _)| l.to_string()).collect();
    let mut series = CategorySeries::new(
        "Jobs",
        DEFAULT_COLOR,
        (0..MEMORY_BUCKETS.len())
            .map(|i| counts.get(i).copied().unwrap_or(0) as f64)
            .collect(),
    );
    series.point_colors = MEMORY_BUCKETS.iter().map(|(_, c)| c.to_string()).collect();
    (categories, series)
}

/// Categories `0`..`n-1` for percentage histograms.
pub fn percent_categories(n: usize) -> Vec<String> {
    (0..n).map(|i| i.to_string()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSummary {
    pub total_jobs: u64,
    pub failed_co2e_pct: f64,
    pub more1h_pct: f64,
    pub more1h_co2e_pct: f64,
}

fn pct(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part * 100.0 / whole
    } else {
        0.0
    }
}

pub fn status_summary(s: &StatusesData) -> StatusSummary {
    let overall = s.done.co2e + s.exit.co2e;
    StatusSummary {
        total_jobs: s.done.total + s.exit.total,
        failed_co2e_pct: pct(s.exit.co2e, overall),
        more1h_pct: pct(s.exit.more1h as f64, s.exit.total as f64),
        more1h_co2e_pct: pct(s.exit.more1h_co2e, overall),
    }
}

pub fn status_segments(s: &StatusesData) -> Vec<Segment> {
    vec![
        Segment::new("Done", "#2ECC71", s.done.total as f64),
        Segment::new("Failed (mem. limit)", "#E74C3C", s.exit.memlim as f64),
        Segment::new(
            "Failed (other)",
            "#C0392B",
            s.exit.total.saturating_sub(s.exit.memlim) as f64,
        ),
    ]
}
