use once_cell::sync::Lazy;
use regex::Regex;

static UUID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9]+$").expect("uuid regex"));
static LOCAL_PART_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9\-_]+$").expect("email regex"));

/// Identifiers restored from storage or the URL must look like this; anything
/// else is stale data from an older storage format.
pub fn is_valid_uuid(s: &str) -> bool {
    UUID_RE.is_match(s)
}

/// Sign-up e-mails are `login@domain`, with the domain fixed by the server
/// configuration when one is set.
pub fn is_valid_signup_email(email: &str, domain: Option<&str>) -> bool {
    let email = email.trim().to_lowercase();
    let Some((local, host)) = email.split_once('@') else {
        return false;
    };
    if !LOCAL_PART_RE.is_match(local) || host.is_empty() {
        return false;
    }
    match domain {
        Some(domain) => host == domain.to_lowercase(),
        None => !host.contains('@'),
    }
}

/// Anchor id for a team tab: whitespace and slashes become dashes.
pub fn team_anchor(team: &str) -> String {
    team.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .replace('/', "-")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_shape() {
        assert!(is_valid_uuid("0a1b2c3d"));
        assert!(!is_valid_uuid(""));
        assert!(!is_valid_uuid("ABC"));
        assert!(!is_valid_uuid(r#"{"uuid":"abc"}"#));
    }

    #[test]
    fn signup_email_domain() {
        assert!(is_valid_signup_email("jdoe@ebi.ac.uk", Some("ebi.ac.uk")));
        assert!(is_valid_signup_email(" JDoe@EBI.ac.uk ", Some("ebi.ac.uk")));
        assert!(!is_valid_signup_email("jdoe@example.org", Some("ebi.ac.uk")));
        assert!(!is_valid_signup_email("j.doe@ebi.ac.uk", Some("ebi.ac.uk")));
        assert!(is_valid_signup_email("j-doe_2@example.org", None));
        assert!(!is_valid_signup_email("jdoe", None));
        assert!(!is_valid_signup_email("jdoe@", None));
    }

    #[test]
    fn anchors() {
        assert_eq!(team_anchor("Data  Science/ML"), "data-science-ml");
    }
}
