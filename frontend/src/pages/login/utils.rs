/// Local pre-flight validation; the backend remains the authority on
/// whether the credentials are actually valid.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Enter your email address".to_string());
    }
    if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err("Enter a valid email address".to_string());
    }
    if password.is_empty() {
        return Err("Enter your password".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_credentials;

    #[test]
    fn accepts_a_plausible_email_and_password() {
        assert!(validate_credentials("ops@acme-logistics.test", "secret").is_ok());
    }

    #[test]
    fn rejects_blank_fields() {
        assert!(validate_credentials("", "secret").is_err());
        assert!(validate_credentials("ops@acme-logistics.test", "").is_err());
        assert!(validate_credentials("   ", "secret").is_err());
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(validate_credentials("not-an-email", "secret").is_err());
        assert!(validate_credentials("@example.test", "secret").is_err());
        assert!(validate_credentials("ops@", "secret").is_err());
    }
}
