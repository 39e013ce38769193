use hereabouts::domain::UserId;

#[test]
fn given_padded_id_when_parsing_then_trims() {
    let id = UserId::parse("  u1 ").unwrap();
    assert_eq!(id.as_str(), "u1");
    assert_eq!(id.to_string(), "u1");
}

#[test]
fn given_blank_id_when_parsing_then_none() {
    assert!(UserId::parse("").is_none());
    assert!(UserId::parse("   ").is_none());
}
