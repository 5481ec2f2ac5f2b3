use incident_core::{
    validate_source, validate_status, validate_text, IncidentSource, IncidentStatus,
    ValidationError,
};

#[test]
fn validate_status_normalizes_case_and_whitespace() {
    assert_eq!(validate_status(" PENDING "), Ok(IncidentStatus::Pending));
    assert_eq!(validate_status("In Progress"), Ok(IncidentStatus::InProgress));
    assert_eq!(validate_status("solved\n"), Ok(IncidentStatus::Solved));
    assert_eq!(IncidentStatus::Pending.as_str(), "pending");
}

#[test]
fn validate_status_rejects_values_outside_enumeration() {
    for value in ["archived", "", "   ", "in_progress", "inprogress", "pending!"] {
        assert_eq!(
            validate_status(value),
            Err(ValidationError::InvalidStatus(value.to_string())),
            "`{value}` should be rejected"
        );
    }
}

#[test]
fn validate_source_normalizes_and_rejects() {
    assert_eq!(validate_source(" Monitoring"), Ok(IncidentSource::Monitoring));
    assert_eq!(validate_source("PARTNER"), Ok(IncidentSource::Partner));
    assert_eq!(validate_source("operator"), Ok(IncidentSource::Operator));

    for value in ["customer", "", "pending"] {
        assert_eq!(
            validate_source(value),
            Err(ValidationError::InvalidSource(value.to_string()))
        );
    }
}

#[test]
fn validation_messages_name_offending_value() {
    let message = validate_status("archived").unwrap_err().to_string();
    assert!(message.contains("'archived'"));
    assert!(message.contains("in progress"));

    let message = validate_source("robot").unwrap_err().to_string();
    assert!(message.contains("'robot'"));
    assert!(message.contains("monitoring"));
}

#[test]
fn validate_text_rejects_blank() {
    assert_eq!(validate_text("  \t"), Err(ValidationError::EmptyText));
    assert_eq!(validate_text("Scooter 5 offline"), Ok("Scooter 5 offline"));
}

#[test]
fn enums_use_canonical_wire_strings() {
    let json = serde_json::to_value(IncidentStatus::InProgress).unwrap();
    assert_eq!(json, "in progress");

    let decoded: IncidentSource = serde_json::from_value(serde_json::json!(" Partner ")).unwrap();
    assert_eq!(decoded, IncidentSource::Partner);

    let err = serde_json::from_value::<IncidentStatus>(serde_json::json!("closed")).unwrap_err();
    assert!(err.to_string().contains("closed"));
}
