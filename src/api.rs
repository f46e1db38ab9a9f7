use dioxus::prelude::*;

use crate::shared::types::{
    ActivityDto, CpuDistDto, MemoryDistDto, MonthlyFootprintDto, RuntimeDistDto, ServiceInfoDto,
    SignUpDto, StatusesDto, TeamActivityDto, TeamsFootprintDto, UserDto, UserFootprintDto,
    UserReportDto,
};

/// Liveness check: the service info only counts when it carries `updated`.
#[server(GetServiceInfo)]
pub async fn service_info() -> Result<ServiceInfoDto, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use crate::backend::{settings, to_server_error, upstream};
        use crate::shared::types::{ApiMetaDto, MetaOnly};

        let settings = settings().map_err(to_server_error)?;
        let info: MetaOnly<ApiMetaDto> = upstream::get_json(&[]).await.map_err(to_server_error)?;
        let docs_url = upstream::endpoint_url(&settings.api_url, &["docs"])
            .map_err(to_server_error)?
            .to_string();
        Ok(ServiceInfoDto {
            contact_email: info.meta.email,
            contact_slack: info.meta.slack,
            updated: info.meta.updated,
            docs_url,
            signup_email_domain: settings.signup_email_domain.clone(),
        })
    }
    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("server unavailable"))
    }
}

#[cfg(feature = "server")]
async fn proxy<T: serde::de::DeserializeOwned>(segments: &[&str]) -> Result<T, ServerFnError> {
    crate::backend::upstream::get_json(segments)
        .await
        .map_err(crate::backend::to_server_error)
}

#[server(GetMonthlyFootprint)]
pub async fn monthly_footprint() -> Result<MonthlyFootprintDto, ServerFnError> {
    #[cfg(feature = "server")]
    {
        proxy(&["footprint"]).await
    }
    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("server unavailable"))
    }
}

#[server(GetRecentActivity)]
pub async fn recent_activity() -> Result<ActivityDto, ServerFnError> {
    #[cfg(feature = "server")]
    {
        proxy(&["activity"]).await
    }
    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("server unavailable"))
    }
}

#[server(GetTeamsFootprint)]
pub async fn teams_footprint() -> Result<TeamsFootprintDto, ServerFnError> {
    #[cfg(feature = "server")]
    {
        proxy(&["footprint", "teams"]).await
    }
    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("server unavailable"))
    }
}

#[server(GetMemoryDistribution)]
pub async fn memory_distribution() -> Result<MemoryDistDto, ServerFnError> {
    #[cfg(feature = "server")]
    {
        proxy(&["distribution", "memory"]).await
    }
    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("server unavailable"))
    }
}

#[server(GetCpuDistribution)]
pub async fn cpu_distribution() -> Result<CpuDistDto, ServerFnError> {
    #[cfg(feature = "server")]
    {
        proxy(&["distribution", "cpu"]).await
    }
    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("server unavailable"))
    }
}

#[server(GetRuntimeDistribution)]
pub async fn runtime_distribution() -> Result<RuntimeDistDto, ServerFnError> {
    #[cfg(feature = "server")]
    {
        proxy(&["distribution", "runtime"]).await
    }
    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("server unavailable"))
    }
}

#[server(GetJobStatuses)]
pub async fn job_statuses() -> Result<StatusesDto, ServerFnError> {
    #[cfg(feature = "server")]
    {
        proxy(&["statuses"]).await
    }
    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("server unavailable"))
    }
}

#[server(SignIn)]
pub async fn sign_in(uuid: String) -> Result<UserDto, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use crate::shared::types::MetaOnly;
        use dioxus::logger::tracing::info;

        let user: MetaOnly<UserDto> = proxy(&["user", uuid.as_str()]).await?;
        info!("[sign-in] {} signed in", user.meta.login);
        Ok(user.meta)
    }
    #[cfg(not(feature = "server"))]
    {
        let _ = uuid;
        Err(ServerFnError::new("server unavailable"))
    }
}

#[server(SignUp)]
pub async fn sign_up(email: String) -> Result<SignUpDto, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use crate::backend::{settings, to_server_error, upstream};
        use crate::shared::types::{MetaOnly, SignUpRequest};
        use crate::utils::validate::is_valid_signup_email;

        let settings = settings().map_err(to_server_error)?;
        let email = email.trim().to_lowercase();
        if !is_valid_signup_email(&email, settings.signup_email_domain.as_deref()) {
            return Err(ServerFnError::new(format!("Invalid e-mail address: {email}")));
        }
        let created: MetaOnly<SignUpDto> = upstream::post_json(&["user"], &SignUpRequest { email })
            .await
            .map_err(to_server_error)?;
        Ok(created.meta)
    }
    #[cfg(not(feature = "server"))]
    {
        let _ = email;
        Err(ServerFnError::new("server unavailable"))
    }
}

#[server(GetUserFootprint)]
pub async fn user_footprint(uuid: String) -> Result<UserFootprintDto, ServerFnError> {
    #[cfg(feature = "server")]
    {
        proxy(&["user", uuid.as_str(), "footprint"]).await
    }
    #[cfg(not(feature = "server"))]
    {
        let _ = uuid;
        Err(ServerFnError::new("server unavailable"))
    }
}

#[server(GetUserReport)]
pub async fn user_report(uuid: String, month: String) -> Result<UserReportDto, ServerFnError> {
    #[cfg(feature = "server")]
    {
        proxy(&["user", uuid.as_str(), "report", month.as_str()]).await
    }
    #[cfg(not(feature = "server"))]
    {
        let _ = (uuid, month);
        Err(ServerFnError::new("server unavailable"))
    }
}

#[server(GetTeamActivity)]
pub async fn team_activity(uuid: String, team: String) -> Result<TeamActivityDto, ServerFnError> {
    #[cfg(feature = "server")]
    {
        proxy(&["user", uuid.as_str(), "team", team.as_str()]).await
    }
    #[cfg(not(feature = "server"))]
    {
        let _ = (uuid, team);
        Err(ServerFnError::new("server unavailable"))
    }
}

/// Message of a failed server call, without the transport prefix.
pub fn error_message(e: &ServerFnError) -> String {
    match e {
        ServerFnError::ServerError(msg) => msg.clone(),
        other => other.to_string(),
    }
}
