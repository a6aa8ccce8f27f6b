use crate::error::{Result, SpinError};

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;

/// Check that `input` looks like `local@domain.tld` and return it trimmed.
pub fn validate_email(input: &str) -> Result<String> {
    let email = input.trim();

    if email.is_empty() {
        return Err(SpinError::invalid_email("Please enter your email"));
    }

    if email.len() > MAX_EMAIL_LEN {
        return Err(SpinError::invalid_email("Email address is too long"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| SpinError::invalid_email("Please enter a valid email address"))?;

    if !is_valid_local(local) || !is_valid_domain(domain) {
        return Err(SpinError::invalid_email("Please enter a valid email address"));
    }

    Ok(email.to_string())
}

fn is_valid_local(local: &str) -> bool {
    !local.is_empty()
        && local.len() <= MAX_LOCAL_LEN
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+/=?^_`{|}~.-".contains(c))
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld = labels[labels.len() - 1];
    labels_ok && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_shapes() {
        for email in [
            "visitor@example.com",
            "first.last+promo@mail.example.co.uk",
            "a_b-c@sub-domain.io",
        ] {
            assert_eq!(validate_email(email).unwrap(), email);
        }
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(
            validate_email("  visitor@example.com \n").unwrap(),
            "visitor@example.com"
        );
    }

    #[test]
    fn test_rejects_malformed() {
        for email in [
            "",
            "   ",
            "not-an-email",
            "@example.com",
            "visitor@",
            "visitor@example",
            "visitor@@example.com",
            "visi tor@example.com",
            "visitor@exa_mple.com",
            "visitor@example.c",
            "visitor@-example.com",
            ".visitor@example.com",
            "visitor..x@example.com",
            "visitor@example..com",
        ] {
            assert!(
                matches!(validate_email(email), Err(SpinError::InvalidEmail(_))),
                "accepted {:?}",
                email
            );
        }
    }

    #[test]
    fn test_empty_message() {
        let err = validate_email("").unwrap_err();
        assert_eq!(err.to_string(), "Invalid email: Please enter your email");
    }
}
