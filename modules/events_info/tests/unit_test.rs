use events_info::config::EventsInfoConfig;
use events_info::contract::error::EventsInfoError;
use events_info::domain::error::DomainError;
// Note: These internal module imports are only for testing
// External consumers should only use the `contract` module

#[test]
fn test_domain_to_contract_error_conversion() {
    let cases = [
        (DomainError::event_not_found(1), "NotFound"),
        (DomainError::user_not_found(1), "NotFound"),
        (DomainError::email_not_found("a@x.com"), "NotFound"),
        (DomainError::forbidden(1, 2), "Forbidden"),
        (DomainError::InvalidCredentials, "Unauthorized"),
        (DomainError::attendee_already_exists(1, 2), "Conflict"),
        (DomainError::email_already_exists("a@x.com"), "Conflict"),
        (DomainError::validation("name", "too short"), "Validation"),
        (DomainError::database("locked"), "Internal"),
        (DomainError::internal("boom"), "Internal"),
    ];

    for (domain, expected) in cases {
        let contract: EventsInfoError = domain.into();
        let kind = match contract {
            EventsInfoError::NotFound { .. } => "NotFound",
            EventsInfoError::Forbidden { .. } => "Forbidden",
            EventsInfoError::Unauthorized { .. } => "Unauthorized",
            EventsInfoError::Conflict { .. } => "Conflict",
            EventsInfoError::Validation { .. } => "Validation",
            EventsInfoError::Internal => "Internal",
        };
        assert_eq!(kind, expected);
    }
}

#[test]
fn test_internal_details_do_not_leak() {
    let contract: EventsInfoError = DomainError::database("no such table: events").into();
    assert_eq!(contract, EventsInfoError::Internal);
    assert!(!contract.to_string().contains("events"));
}

#[test]
fn test_validation_message_names_field() {
    let contract: EventsInfoError = DomainError::validation("location", "too short").into();
    assert_eq!(
        contract,
        EventsInfoError::validation("location: too short")
    );
}

#[test]
fn test_config_defaults() {
    let cfg = EventsInfoConfig::default();
    assert_eq!(cfg.token_ttl_hours, 72);
    assert!(cfg.uses_default_secret());

    let cfg: EventsInfoConfig =
        serde_json::from_value(serde_json::json!({ "jwt_secret": "s3cr3t" })).unwrap();
    assert_eq!(cfg.jwt_secret, "s3cr3t");
    assert_eq!(cfg.token_ttl_hours, 72);
    assert!(!cfg.uses_default_secret());

    let bad = serde_json::from_value::<EventsInfoConfig>(serde_json::json!({ "ttl": 1 }));
    assert!(bad.is_err());
}
