use auth_api::{IdentifierPolicy, PolicyError, SecretPolicy};

#[test]
fn policy_accepts_identifier_with_configured_digit_count() {
    let nine = IdentifierPolicy::digits(9);
    assert!(nine.validate("555123456").is_ok());

    let ten = IdentifierPolicy::default();
    assert_eq!(ten.digit_count(), 10);
    assert!(ten.validate("5551234567").is_ok());
}

#[test]
fn policy_rejects_identifier_with_wrong_length() {
    let policy = IdentifierPolicy::digits(10);

    assert_eq!(
        policy.validate("555123456"),
        Err(PolicyError::InvalidIdentifier { expected_digits: 10 })
    );
    assert!(policy.validate("55512345678").is_err());
    assert!(policy.validate("").is_err());
}

#[test]
fn policy_rejects_identifier_with_non_digits() {
    let policy = IdentifierPolicy::digits(9);

    assert!(policy.validate("55512345a").is_err());
    assert!(policy.validate("555-12345").is_err());
    assert!(policy.validate(" 55512345").is_err());
}

#[test]
fn policy_accepts_secret_at_minimum_length() {
    let policy = SecretPolicy::default();

    assert!(policy.validate("password1").is_ok());
    assert!(policy.validate("12345678").is_ok());
}

#[test]
fn policy_rejects_secret_below_minimum_length() {
    let policy = SecretPolicy::default();

    assert_eq!(
        policy.validate("short"),
        Err(PolicyError::SecretTooShort { min_length: 8 })
    );
    assert!(policy.validate("1234567").is_err());
}

#[test]
fn policy_errors_render_display_safe_messages() {
    let identifier = PolicyError::InvalidIdentifier { expected_digits: 9 };
    assert_eq!(
        identifier.to_string(),
        "account number must be exactly 9 digits"
    );

    let secret = PolicyError::SecretTooShort { min_length: 8 };
    assert_eq!(
        secret.to_string(),
        "password must be at least 8 characters"
    );
}
