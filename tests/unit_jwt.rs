use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use taskdesk::config::jwt::JwtConfig;
use taskdesk::modules::auth::model::Claims;
use taskdesk::utils::jwt::{create_session_token, verify_session_token};

fn test_config() -> JwtConfig {
    JwtConfig {
        secret: "unit-test-signing-secret-0001".to_string(),
        session_hours: 8,
        remember_me_hours: 168,
    }
}

#[test]
fn test_signed_token_round_trips() {
    let config = test_config();

    let token = create_session_token(42, config.session_hours, &config).unwrap();
    assert!(!token.is_empty());

    let claims = verify_session_token(&token, &config).unwrap();
    assert_eq!(claims.user_id, 42);
}

#[test]
fn test_rejects_garbage_token() {
    let config = test_config();

    let result = verify_session_token("garbage.token.value", &config);

    assert!(result.is_err());
}

#[test]
fn test_rejects_token_signed_with_other_key() {
    let config = test_config();
    let token = create_session_token(42, config.session_hours, &config).unwrap();

    let other_config = JwtConfig {
        secret: "another-signing-secret".to_string(),
        ..test_config()
    };

    let result = verify_session_token(&token, &other_config);

    assert!(result.is_err());
}

#[test]
fn test_rejects_token_signed_with_other_algorithm() {
    let config = test_config();
    let now = Utc::now().timestamp();
    let claims = Claims {
        user_id: 42,
        iat: now,
        exp: now + 3600,
    };

    // Right secret, wrong algorithm: only HS256 may pass verification
    let token = encode(
        &Header::new(Algorithm::HS384),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .unwrap();

    let result = verify_session_token(&token, &config);

    assert!(result.is_err());
}

#[test]
fn test_rejects_empty_token() {
    let config = test_config();

    let result = verify_session_token("", &config);

    assert!(result.is_err());
}

#[test]
fn test_lifetime_sets_exact_expiry() {
    let config = test_config();

    let token = create_session_token(42, config.session_hours, &config).unwrap();
    let claims = verify_session_token(&token, &config).unwrap();

    assert!(claims.exp > claims.iat);
    assert_eq!(claims.exp - claims.iat, config.session_hours * 3600);
}

#[test]
fn test_remember_me_extends_expiry() {
    let config = test_config();

    let short = create_session_token(42, config.session_hours, &config).unwrap();
    let long = create_session_token(42, config.remember_me_hours, &config).unwrap();

    let short_claims = verify_session_token(&short, &config).unwrap();
    let long_claims = verify_session_token(&long, &config).unwrap();

    assert!(long_claims.exp - long_claims.iat > short_claims.exp - short_claims.iat);
    assert_eq!(
        long_claims.exp - long_claims.iat,
        config.remember_me_hours * 3600
    );
}

#[test]
fn test_rejects_expired_token() {
    let config = test_config();

    // Negative lifetime puts `exp` in the past
    let token = create_session_token(42, -1, &config).unwrap();
    let result = verify_session_token(&token, &config);

    assert!(result.is_err());
}

#[test]
fn test_rejects_structurally_broken_tokens() {
    let config = test_config();
    let broken = ["onlyonepart", "just.two", "a.b.c.d.e", "header..signature", ".."];

    for token in broken {
        let result = verify_session_token(token, &config);
        assert!(result.is_err(), "expected rejection for {token:?}");
    }
}

#[test]
fn test_tokens_are_user_specific() {
    let config = test_config();

    let first = create_session_token(1, config.session_hours, &config).unwrap();
    let second = create_session_token(2, config.session_hours, &config).unwrap();

    assert_ne!(first, second);

    assert_eq!(verify_session_token(&first, &config).unwrap().user_id, 1);
    assert_eq!(verify_session_token(&second, &config).unwrap().user_id, 2);
}
