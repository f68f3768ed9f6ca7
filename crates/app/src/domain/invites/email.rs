//! Email address normalisation and syntax checks.

use validator::ValidateEmail;

/// Canonical form used as the dedup key.
#[must_use]
pub fn normalise_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// `local@domain.tld` check: a syntactically valid address whose domain has a
/// dot with text on both sides.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email.validate_email() && has_dotted_domain(email)
}

/// Bare hosts like `localhost` pass the address grammar but are not accepted
/// for signups.
#[must_use]
pub fn has_dotted_domain(email: &str) -> bool {
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };

    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}
