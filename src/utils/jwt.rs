use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// 会话令牌 Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (tutor email)
    pub exp: usize,  // Expiration time (时间戳)
    pub iat: usize,  // Issued at (签发时间)
}

pub struct JwtUtils;

impl JwtUtils {
    // 签发会话令牌
    pub fn issue_session_token(
        email: &str,
        secret: &str,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let expiration = issued_at + lifetime;

        let claims = Claims {
            sub: email.to_string(),
            exp: expiration.timestamp().max(0) as usize,
            iat: issued_at.timestamp().max(0) as usize,
        };

        let encoding_key = EncodingKey::from_secret(secret.as_ref());
        encode(&Header::default(), &claims, &encoding_key)
    }

    // 验证会话令牌
    pub fn verify_session_token(
        token: &str,
        secret: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify() {
        let token = JwtUtils::issue_session_token(
            "tutor@example.edu",
            "secret-key",
            Utc::now(),
            Duration::minutes(30),
        )
        .unwrap();

        let claims = JwtUtils::verify_session_token(&token, "secret-key").unwrap();
        assert_eq!(claims.sub, "tutor@example.edu");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtUtils::issue_session_token(
            "tutor@example.edu",
            "secret-key",
            Utc::now(),
            Duration::minutes(30),
        )
        .unwrap();

        assert!(JwtUtils::verify_session_token(&token, "other-key").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = JwtUtils::issue_session_token(
            "tutor@example.edu",
            "secret-key",
            Utc::now() - Duration::hours(2),
            Duration::minutes(30),
        )
        .unwrap();

        assert!(JwtUtils::verify_session_token(&token, "secret-key").is_err());
    }
}
