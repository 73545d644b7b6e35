use std::sync::OnceLock;

use rand::RngCore;
use regex::Regex;

use crate::error::HeroApiError;

/// Length of a generated session id.
pub const SESSION_ID_LEN: usize = 14;

pub const ACCOUNT_ID_TOKEN: &str = "NXAccountId";
pub const AUTH_TOKEN_TOKEN: &str = "NXAuth";

/// Identity values the landing page embeds for the logged-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingTokens {
    pub account_id: String,
    pub auth_token: String,
}

fn account_id_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(r"var NXAccountId = '(.*?)'").expect("account id regex must compile")
    })
}

fn auth_token_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(r"var NXAuth = '(.*?)'").expect("auth token regex must compile")
    })
}

/// Pulls the account id and auth token out of the landing page HTML.
pub fn extract_landing_tokens(page: &str) -> Result<LandingTokens, HeroApiError> {
    let capture = |regex: &Regex, token: &'static str| {
        regex
            .captures(page)
            .and_then(|captures| captures.get(1))
            .map(|value| value.as_str().to_owned())
            .ok_or(HeroApiError::MissingPageToken(token))
    };

    Ok(LandingTokens {
        account_id: capture(account_id_regex(), ACCOUNT_ID_TOKEN)?,
        auth_token: capture(auth_token_regex(), AUTH_TOKEN_TOKEN)?,
    })
}

/// Fresh lower-case hex session id drawn from the thread-local CSPRNG.
pub fn generate_session_id() -> String {
    let mut bytes = [0u8; SESSION_ID_LEN.div_ceil(2)];
    rand::thread_rng().fill_bytes(&mut bytes);
    let mut id = hex::encode(bytes);
    id.truncate(SESSION_ID_LEN);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><script>
        var NXAppInfo = {};
        var NXAccountId = '512345678';
        var NXAuth = 'c0ffee:deadbeef';
    </script></html>"#;

    #[test]
    fn extracts_both_tokens() {
        let tokens = extract_landing_tokens(PAGE).expect("tokens should extract");
        assert_eq!(
            tokens,
            LandingTokens {
                account_id: "512345678".to_owned(),
                auth_token: "c0ffee:deadbeef".to_owned(),
            }
        );
    }

    #[test]
    fn missing_account_id_is_reported_by_name() {
        let error = extract_landing_tokens("var NXAuth = 'x';").expect_err("must fail");
        assert!(matches!(error, HeroApiError::MissingPageToken(ACCOUNT_ID_TOKEN)));
    }

    #[test]
    fn missing_auth_token_is_reported_by_name() {
        let error = extract_landing_tokens("var NXAccountId = '1';").expect_err("must fail");
        assert!(matches!(error, HeroApiError::MissingPageToken(AUTH_TOKEN_TOKEN)));
    }

    #[test]
    fn session_id_is_fourteen_lower_hex_chars() {
        for _ in 0..32 {
            let id = generate_session_id();
            assert_eq!(id.len(), SESSION_ID_LEN);
            assert!(id
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn session_ids_do_not_repeat() {
        assert_ne!(generate_session_id(), generate_session_id());
    }
}
