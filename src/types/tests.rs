use super::QueryKey;

#[test]
fn test_query_keys_have_stable_identifiers() {
    assert_eq!(QueryKey::Balance.as_str(), "balance");
    assert_eq!(QueryKey::UnsuccessfulTransactions.as_str(), "unsuccessful-transactions");
}

#[test]
fn test_query_key_display_matches_identifier() {
    assert_eq!(QueryKey::Balance.to_string(), "balance");
    assert_eq!(QueryKey::UnsuccessfulTransactions.to_string(), "unsuccessful-transactions");
}
