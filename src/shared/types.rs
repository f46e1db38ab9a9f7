use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Upstream responses are `{ "data": ..., "meta": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<D, M> {
    pub data: D,
    pub meta: M,
}

/// Time window most resources are aggregated over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowMeta {
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub stop: Option<String>,
}

pub type Windowed<D> = Envelope<D, WindowMeta>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMetaDto {
    pub email: String,
    #[serde(default)]
    pub slack: Option<String>,
    pub updated: String,
}

/// Service info handed to the client after a successful liveness check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfoDto {
    pub contact_email: String,
    pub contact_slack: Option<String>,
    pub updated: String,
    pub docs_url: String,
    pub signup_email_domain: Option<String>,
}

// ---------- overview ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMonthFootprint {
    pub team: String,
    #[serde(default)]
    pub jobs: f64,
    #[serde(default)]
    pub cputime: f64,
    #[serde(default)]
    pub co2e: f64,
    #[serde(default)]
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthFootprint {
    pub month: String,
    #[serde(default)]
    pub footprint: Vec<TeamMonthFootprint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthsMeta {
    #[serde(default)]
    pub months: u32,
}

pub type MonthlyFootprintDto = Envelope<Vec<MonthFootprint>, MonthsMeta>;

// ---------- activity ----------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobCounts {
    #[serde(default)]
    pub submitted: f64,
    #[serde(default)]
    pub completed: f64,
    #[serde(default)]
    pub failed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPoint {
    pub timestamp: i64,
    #[serde(default)]
    pub cores: f64,
    /// GB
    #[serde(default)]
    pub memory: f64,
    #[serde(default)]
    pub jobs: JobCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMarker {
    pub x: i64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityData {
    #[serde(default)]
    pub activity: Vec<ActivityPoint>,
    /// Keyed by chart: `jobs`, `cores`, `memory`.
    #[serde(default)]
    pub events: BTreeMap<String, Vec<EventMarker>>,
    #[serde(default)]
    pub co2e: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub cputime: f64,
}

pub type ActivityDto = Windowed<ActivityData>;

// ---------- teams ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTeamsPoint {
    pub timestamp: i64,
    #[serde(default)]
    pub teams: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamTotal {
    pub name: String,
    #[serde(default)]
    pub co2e: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub cputime: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamsFootprintData {
    #[serde(default)]
    pub activity: Vec<DailyTeamsPoint>,
    #[serde(default)]
    pub teams: Vec<TeamTotal>,
}

pub type TeamsFootprintDto = Windowed<TeamsFootprintData>;

// ---------- distributions ----------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wasted {
    #[serde(default)]
    pub co2e: f64,
    #[serde(default)]
    pub cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryDistData {
    #[serde(default)]
    pub dist: Vec<u64>,
    #[serde(default)]
    pub wasted: Wasted,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuDistData {
    #[serde(default)]
    pub dist: Vec<u64>,
}

/// Runtime buckets as `[label, count]` pairs; labels may contain HTML entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeDistData {
    #[serde(default)]
    pub dist: Vec<(String, u64)>,
}

pub type MemoryDistDto = Windowed<MemoryDistData>;
pub type CpuDistDto = Windowed<CpuDistData>;
pub type RuntimeDistDto = Windowed<RuntimeDistData>;

// ---------- statuses ----------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoneStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub co2e: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExitStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub co2e: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub memlim: u64,
    #[serde(default)]
    pub more1h: u64,
    #[serde(default, rename = "more1hCo2e")]
    pub more1h_co2e: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusesData {
    #[serde(default)]
    pub done: DoneStats,
    #[serde(default)]
    pub exit: ExitStats,
}

pub type StatusesDto = Windowed<StatusesData>;

// ---------- users ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, rename = "photoUrl")]
    pub photo_url: Option<String>,
    /// `(report id, human label)`, e.g. `("2023-01", "January 2023")`.
    #[serde(default)]
    pub reports: Vec<(String, String)>,
}

impl UserDto {
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", name, self.login),
            None => self.login.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaOnly<M> {
    pub meta: M,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUpDto {
    pub email: String,
    #[serde(default)]
    pub sponsor: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsagePoint {
    pub timestamp: i64,
    #[serde(default)]
    pub cores: f64,
    #[serde(default)]
    pub memory: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserFootprintData {
    #[serde(default)]
    pub jobs: f64,
    #[serde(default)]
    pub done: u64,
    #[serde(default)]
    pub exit: u64,
    #[serde(default)]
    pub co2e: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub activity: Vec<UsagePoint>,
    /// Five memory-efficiency buckets of 20% each.
    #[serde(default)]
    pub memory: Vec<u64>,
}

pub type UserFootprintDto = Windowed<UserFootprintData>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobsTotal {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamCost {
    pub name: String,
    #[serde(default)]
    pub co2e: f64,
    #[serde(default)]
    pub cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserReportData {
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub contribution: f64,
    #[serde(default)]
    pub co2e: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub jobs: JobsTotal,
    #[serde(default)]
    pub teams: Vec<TeamCost>,
    #[serde(default)]
    pub memory: Vec<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    #[serde(default)]
    pub month: String,
}

pub type UserReportDto = Envelope<UserReportData, ReportMeta>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostPair {
    #[serde(default)]
    pub co2e: f64,
    #[serde(default)]
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyUsersPoint {
    pub timestamp: i64,
    #[serde(default)]
    pub users: BTreeMap<String, CostPair>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamActivityData {
    #[serde(default)]
    pub activity: Vec<UsagePoint>,
    #[serde(default)]
    pub footprint: Vec<DailyUsersPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMeta {
    #[serde(default)]
    pub days: u32,
    /// Login to display name.
    #[serde(default)]
    pub users: BTreeMap<String, Option<String>>,
}

pub type TeamActivityDto = Envelope<TeamActivityData, TeamMeta>;

/// Error body of the footprint API: `{"detail": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiProblem {
    #[serde(default, deserialize_with = "string_or_number")]
    pub status: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
}

impl std::fmt::Display for ApiProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}. {}.", self.status, self.title, self.detail)
    }
}

impl std::error::Error for ApiProblem {}

/// Problem statuses come as `401` or `"401"` depending on the upstream route.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProblemBody {
    pub detail: ApiProblem,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_payload_with_missing_events() {
        let raw = r#"{
            "data": {
                "activity": [
                    {"timestamp": 1700000000000, "cores": 512, "memory": 2048.5,
                     "jobs": {"submitted": 10, "completed": 8, "failed": 1}}
                ],
                "co2e": 1234.5, "cost": 12.0, "cputime": 3600
            },
            "meta": {"days": 14, "start": "202311010000", "stop": "202311150000"}
        }"#;
        let dto: ActivityDto = serde_json::from_str(raw).unwrap();
        assert_eq!(dto.meta.days, 14);
        assert_eq!(dto.data.activity.len(), 1);
        assert_eq!(dto.data.activity[0].jobs.submitted, 10.0);
        assert!(dto.data.events.is_empty());
    }

    #[test]
    fn statuses_use_camel_case_field() {
        let raw = r#"{
            "data": {
                "done": {"total": 90, "co2e": 900.0},
                "exit": {"total": 10, "co2e": 100.0, "cost": 2.5, "memlim": 4,
                         "more1h": 3, "more1hCo2e": 60.0}
            },
            "meta": {"days": 7}
        }"#;
        let dto: StatusesDto = serde_json::from_str(raw).unwrap();
        assert_eq!(dto.data.exit.more1h_co2e, 60.0);
        assert_eq!(dto.data.exit.memlim, 4);
        assert_eq!(dto.meta.start, None);
    }

    #[test]
    fn user_sign_in_meta() {
        let raw = r#"{"meta": {
            "login": "jdoe", "name": null, "teams": ["Alpha", "Beta/Gamma"],
            "position": "Engineer", "photoUrl": null,
            "reports": [["2023-01", "January 2023"]]
        }}"#;
        let user: MetaOnly<UserDto> = serde_json::from_str(raw).unwrap();
        assert_eq!(user.meta.display_name(), "jdoe");
        assert_eq!(user.meta.teams[1], "Beta/Gamma");
        assert_eq!(user.meta.reports[0].1, "January 2023");
    }

    #[test]
    fn runtime_buckets_are_pairs() {
        let raw = r#"{"data": {"dist": [["&le; 1 min", 5], ["1 - 10 min", 7]]},
                      "meta": {"days": 14}}"#;
        let dto: RuntimeDistDto = serde_json::from_str(raw).unwrap();
        assert_eq!(dto.data.dist[1], ("1 - 10 min".to_string(), 7));
    }

    #[test]
    fn problem_display() {
        let raw = r#"{"detail": {"status": "401", "title": "Unauthorized", "detail": "Invalid UUID"}}"#;
        let body: ProblemBody = serde_json::from_str(raw).unwrap();
        assert_eq!(body.detail.to_string(), "401 Unauthorized. Invalid UUID.");

        let numeric = r#"{"detail": {"status": 404, "title": "Not Found", "detail": "No such team"}}"#;
        let body: ProblemBody = serde_json::from_str(numeric).unwrap();
        assert_eq!(body.detail.status, "404");
    }

    #[test]
    fn team_meta_allows_null_names() {
        let raw = r#"{
            "data": {"activity": [], "footprint": [
                {"timestamp": 1, "users": {"a": {"co2e": 1.5, "cost": 0.2}}}
            ]},
            "meta": {"days": 14, "users": {"a": "Ann", "b": null}}
        }"#;
        let dto: TeamActivityDto = serde_json::from_str(raw).unwrap();
        assert_eq!(dto.meta.users.get("b"), Some(&None));
        assert_eq!(dto.data.footprint[0].users["a"].co2e, 1.5);
    }
}
