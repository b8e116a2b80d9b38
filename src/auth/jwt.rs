use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::claims::Claims;

/// Verification half of the HS256 key pair. Tokens are issued elsewhere.
pub struct JwtKeys {
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

pub fn validate_jwt(token: &str, keys: &JwtKeys) -> Result<Claims, String> {
    let token_data = decode::<Claims>(token, &keys.decoding, &keys.validation)
        .map_err(|e| format!("JWT validation failed: {}", e))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token_for(sub: &str, exp_offset: i64, secret: &str) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: sub.to_string(),
            exp: now + exp_offset,
            iat: now,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_valid_token() {
        let keys = JwtKeys::new("test_secret");
        let claims = validate_jwt(&token_for("42", 600, "test_secret"), &keys).unwrap();

        assert_eq!(claims.user_id(), Some(42));
    }

    #[test]
    fn test_expired_token() {
        let keys = JwtKeys::new("test_secret");
        let result = validate_jwt(&token_for("42", -3600, "test_secret"), &keys);

        assert!(result.is_err());
    }

    #[test]
    fn test_token_with_wrong_secret() {
        let keys = JwtKeys::new("test_secret");
        let result = validate_jwt(&token_for("42", 600, "other_secret"), &keys);

        assert!(result.is_err());
    }

    #[test]
    fn test_non_numeric_subject() {
        let keys = JwtKeys::new("test_secret");
        let claims = validate_jwt(&token_for("user_abc", 600, "test_secret"), &keys).unwrap();

        assert_eq!(claims.user_id(), None);
    }
}
