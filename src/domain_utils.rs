/// Address splitting and deny-list lookups
pub struct DomainUtils;

impl DomainUtils {
    /// Extract the lower-cased domain from an email address
    pub fn extract_domain(email: &str) -> Option<String> {
        email.split('@').nth(1).map(|s| s.to_lowercase())
    }

    /// Extract the lower-cased local part from an email address
    pub fn extract_local_part(email: &str) -> Option<String> {
        email
            .split_once('@')
            .map(|(local, _)| local.to_lowercase())
    }

    /// Exact, case-insensitive membership. Subdomains of a listed domain do not match.
    pub fn in_domain_list(domain: &str, domain_list: &[String]) -> bool {
        let domain_lower = domain.to_lowercase();
        domain_list
            .iter()
            .any(|pattern| pattern.to_lowercase() == domain_lower)
    }

    /// Domain of a single address-shaped token, used to group history by sender domain.
    /// Free text yields `None`.
    pub fn domain_of_address(text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return None;
        }
        Self::extract_domain(trimmed).filter(|d| !d.is_empty())
    }
}
