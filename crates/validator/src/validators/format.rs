//! Format validators: email, URL and phone number.

use std::sync::LazyLock;

use crate::foundation::ValidationError;

/// Local part, `@`, then at least two dot-separated labels.
static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$"
    ).unwrap()
});

/// Scheme, optional userinfo, host (dotted quad or hostname with TLD),
/// optional port, optional path/query/fragment.
static URL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"(?i)^(?:https?|ftp)://(?:\S+(?::\S*)?@)?(?P<host>[0-9]{1,3}(?:\.[0-9]{1,3}){3}|(?:(?:[a-z0-9\x{a1}-\x{ffff}][a-z0-9\x{a1}-\x{ffff}_-]{0,62})?[a-z0-9\x{a1}-\x{ffff}]\.)+(?:[a-z\x{a1}-\x{ffff}]{2,}\.?))(?::[0-9]{2,5})?(?:[/?#]\S*)?$"
    ).unwrap()
});

static PHONE_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^ {0,2}\+?[0-9 ]{6,20} {0,2}$").unwrap());

// ============================================================================
// EMAIL VALIDATOR
// ============================================================================

crate::validator! {
    /// Validates email format.
    ///
    /// The domain needs at least one dot: `a@b.com` passes, `a@localhost` does not.
    pub Email for str;
    rule(input) { EMAIL_REGEX.is_match(input) }
    error(input) { ValidationError::new("email", "invalid email address") }
    fn email();
}

// ============================================================================
// URL VALIDATOR
// ============================================================================

crate::validator! {
    /// Validates `http`, `https` and `ftp` URLs.
    ///
    /// Literal IPv4 hosts must be public unicast addresses: loopback,
    /// link-local, private ranges, network and broadcast addresses are rejected.
    pub Url for str;
    rule(input) { is_valid_url(input) }
    error(input) { ValidationError::new("url", "invalid URL") }
    fn url();
}

fn is_valid_url(input: &str) -> bool {
    let Some(captures) = URL_REGEX.captures(input) else {
        return false;
    };
    let host = captures.name("host").map_or("", |m| m.as_str());
    match dotted_quad(host) {
        Some(octets) => is_public_ipv4(octets),
        None => true,
    }
}

/// Splits `a.b.c.d` into its numeric parts; `None` if `host` is not four
/// runs of at most three digits.
fn dotted_quad(host: &str) -> Option<[u16; 4]> {
    let mut octets = [0u16; 4];
    let mut parts = host.split('.');
    for octet in &mut octets {
        let part = parts.next()?;
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *octet = part.parse().ok()?;
    }
    parts.next().is_none().then_some(octets)
}

fn is_public_ipv4([a, b, c, d]: [u16; 4]) -> bool {
    let private = a == 10
        || a == 127
        || (a == 169 && b == 254)
        || (a == 192 && b == 168)
        || (a == 172 && (16..=31).contains(&b));
    (1..=223).contains(&a) && b <= 255 && c <= 255 && (1..=254).contains(&d) && !private
}

// ============================================================================
// PHONE VALIDATOR
// ============================================================================

crate::validator! {
    /// Validates a loosely formatted phone number: an optional leading `+`,
    /// then 6 to 20 digits or spaces, padded by at most two spaces either side.
    pub Phone for str;
    rule(input) { PHONE_REGEX.is_match(input) }
    error(input) { ValidationError::new("phone", "invalid phone number") }
    fn phone();
}

// ============================================================================
// TESTS
// ============================================================================
