//! Browser persistence of the signed-in identifier.
//!
//! Session storage always holds the identifier of the current tab; local
//! storage only when the user asked to be remembered.

pub const STORAGE_KEY: &str = "hpc-co2-uuid";

/// Where a stored identifier is looked up, in priority order: URL, local
/// storage, session storage. Blank values are skipped.
pub fn pick_uuid(
    url: Option<String>,
    local: Option<String>,
    session: Option<String>,
) -> Option<String> {
    [url, local, session]
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}

#[cfg(feature = "web")]
mod browser {
    use web_sys::Storage;

    fn session() -> Option<Storage> {
        web_sys::window()?.session_storage().ok()?
    }

    fn local() -> Option<Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    pub fn read(storage: Option<Storage>, key: &str) -> Option<String> {
        storage?.get_item(key).ok()?
    }

    pub fn query_param(key: &str) -> Option<String> {
        let window = web_sys::window()?;
        let search = window.location().search().ok()?;
        let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
        params.get(key)
    }

    pub fn local_item(key: &str) -> Option<String> {
        read(local(), key)
    }

    pub fn session_item(key: &str) -> Option<String> {
        read(session(), key)
    }

    pub fn set(remember: bool, key: &str, value: &str) {
        if let Some(s) = session() {
            let _ = s.set_item(key, value);
        }
        if let Some(l) = local() {
            if remember {
                let _ = l.set_item(key, value);
            } else {
                let _ = l.remove_item(key);
            }
        }
    }

    pub fn remove(key: &str) {
        for storage in [session(), local()].into_iter().flatten() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Identifier to sign in with at startup, if any.
pub fn restore() -> Option<String> {
    #[cfg(feature = "web")]
    {
        pick_uuid(
            browser::query_param("uuid"),
            browser::local_item(STORAGE_KEY),
            browser::session_item(STORAGE_KEY),
        )
    }
    #[cfg(not(feature = "web"))]
    {
        None
    }
}

/// Report to open first, from `?report=`.
pub fn report_param() -> Option<String> {
    #[cfg(feature = "web")]
    {
        browser::query_param("report").filter(|r| !r.trim().is_empty())
    }
    #[cfg(not(feature = "web"))]
    {
        None
    }
}

pub fn remember(uuid: &str, remember_me: bool) {
    #[cfg(feature = "web")]
    browser::set(remember_me, STORAGE_KEY, uuid);
    #[cfg(not(feature = "web"))]
    let _ = (uuid, remember_me);
}

pub fn clear() {
    #[cfg(feature = "web")]
    browser::remove(STORAGE_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn url_wins_over_storage() {
        assert_eq!(pick_uuid(s("abc"), s("def"), s("ghi")), s("abc"));
    }

    #[test]
    fn local_before_session() {
        assert_eq!(pick_uuid(None, s("def"), s("ghi")), s("def"));
        assert_eq!(pick_uuid(None, None, s("ghi")), s("ghi"));
        assert_eq!(pick_uuid(None, None, None), None);
    }

    #[test]
    fn blank_values_are_skipped() {
        assert_eq!(pick_uuid(s(""), s("  "), s("ghi")), s("ghi"));
    }
}
