use once_cell::sync::Lazy;
use regex::Regex;

/// First email-shaped substring.
pub fn extract_email(text: &str) -> Option<String> {
    static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").unwrap());
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

/// First run of 10+ digits, spaces, dashes or parentheses, optionally led by `+`.
pub fn extract_phone(text: &str) -> Option<String> {
    static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?[\d\s\-()]{10,}").unwrap());
    PHONE_RE
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|p| !p.is_empty())
}

/// GitHub profile as an `https://` URL.
pub fn extract_github(text: &str) -> Option<String> {
    static GITHUB_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)github\.com/[\w-]+").unwrap());
    GITHUB_RE.find(text).map(|m| format!("https://{}", m.as_str()))
}

/// LinkedIn profile as an `https://` URL.
pub fn extract_linkedin(text: &str) -> Option<String> {
    static LINKEDIN_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)linkedin\.com/in/[\w-]+").unwrap());
    LINKEDIN_RE.find(text).map(|m| format!("https://{}", m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert_eq!(
            extract_email("mail: jane.doe@mail.example.org now").as_deref(),
            Some("jane.doe@mail.example.org")
        );
        assert_eq!(extract_email("no contact"), None);
    }

    #[test]
    fn test_phone() {
        assert_eq!(
            extract_phone("john@acme.com\n+1 415 555 0100\nExperience").as_deref(),
            Some("+1 415 555 0100")
        );
        assert_eq!(
            extract_phone("Tel (022) 555-1234").as_deref(),
            Some("(022) 555-1234")
        );
        assert_eq!(extract_phone("call 555 12"), None);
    }

    #[test]
    fn test_profile_links() {
        let text = "GitHub.com/jane-doe | linkedin.com/in/janedoe";
        assert_eq!(
            extract_github(text).as_deref(),
            Some("https://GitHub.com/jane-doe")
        );
        assert_eq!(
            extract_linkedin(text).as_deref(),
            Some("https://linkedin.com/in/janedoe")
        );
        assert_eq!(extract_github("gitlab.com/jane"), None);
    }
}
