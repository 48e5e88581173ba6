use super::*;

const NOW_MS: i64 = 1_700_000_000_000;

/// Build a JWT-shaped token whose payload is the given JSON text.
fn token_with_payload(payload_json: &str) -> String {
    format!("header.{}.signature", URL_SAFE_NO_PAD.encode(payload_json))
}

fn token_expiring_in(seconds: i64) -> String {
    token_with_payload(&format!(r#"{{"exp":{}}}"#, NOW_MS / 1000 + seconds))
}

#[test]
fn empty_token_is_not_set() {
    assert_eq!(token_status_at("", NOW_MS), TokenStatus::NotSet);
    assert_eq!(token_status_at("   \n", NOW_MS), TokenStatus::NotSet);
}

#[test]
fn wrong_segment_count_is_invalid() {
    assert_eq!(token_status_at("a.b", NOW_MS), TokenStatus::Invalid);
    assert_eq!(token_status_at("a.b.c.d", NOW_MS), TokenStatus::Invalid);
    assert_eq!(token_status_at("nodots", NOW_MS), TokenStatus::Invalid);
}

#[test]
fn past_exp_is_expired() {
    assert_eq!(token_status_at(&token_expiring_in(-10), NOW_MS), TokenStatus::Expired);
    assert_eq!(token_status_at(&token_expiring_in(0), NOW_MS), TokenStatus::Expired);
}

#[test]
fn exp_within_five_minutes_is_expiring_with_floored_minutes() {
    assert_eq!(
        token_status_at(&token_expiring_in(200), NOW_MS),
        TokenStatus::Expiring { minutes_left: 3 }
    );
}

#[test]
fn exp_beyond_five_minutes_is_valid_with_floored_minutes() {
    assert_eq!(
        token_status_at(&token_expiring_in(3600), NOW_MS),
        TokenStatus::Valid { minutes_left: 60 }
    );
    assert_eq!(
        token_status_at(&token_expiring_in(5 * 60), NOW_MS),
        TokenStatus::Valid { minutes_left: 5 }
    );
}

#[test]
fn undecodable_payload_is_unknown_not_an_error() {
    // Not base64 at all.
    assert_eq!(token_status_at("a.!!!.c", NOW_MS), TokenStatus::Unknown);
    // Base64 but not JSON.
    let garbage = format!("a.{}.c", URL_SAFE_NO_PAD.encode("not json"));
    assert_eq!(token_status_at(&garbage, NOW_MS), TokenStatus::Unknown);
    // JSON but no exp claim.
    assert_eq!(
        token_status_at(&token_with_payload(r#"{"sub":"me"}"#), NOW_MS),
        TokenStatus::Unknown
    );
}

#[test]
fn padded_standard_alphabet_payload_still_decodes() {
    let payload = format!(r#"{{"exp":{}}}"#, NOW_MS / 1000 + 3600);
    let token = format!("header.{}.signature", STANDARD.encode(payload));
    assert_eq!(token_status_at(&token, NOW_MS), TokenStatus::Valid { minutes_left: 60 });
}

#[test]
fn labels_carry_minutes_where_applicable() {
    assert_eq!(
        TokenStatus::Valid { minutes_left: 60 }.label(),
        "Token valid - expires in 60 minutes"
    );
    assert!(TokenStatus::Expired.label().contains("expired"));
    assert!(TokenStatus::Unknown.label().contains("may still work"));
}

#[test]
fn severities_map_one_to_one() {
    assert_eq!(TokenStatus::NotSet.severity(), Severity::None);
    assert_eq!(TokenStatus::Invalid.severity(), Severity::Invalid);
    assert_eq!(TokenStatus::Expired.severity(), Severity::Expired);
    assert_eq!(TokenStatus::Expiring { minutes_left: 1 }.severity(), Severity::Expiring);
    assert_eq!(TokenStatus::Valid { minutes_left: 9 }.severity(), Severity::Valid);
    assert_eq!(TokenStatus::Unknown.severity(), Severity::Unknown);
}
