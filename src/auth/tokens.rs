use rand::{Rng, RngCore};
use time::{Duration, OffsetDateTime};

/// Verification codes are short-lived: the user is expected to type them in.
pub const VERIFICATION_CODE_TTL: Duration = Duration::hours(24);

/// Reset tokens ride in a link, so they get a tighter window.
pub const RESET_TOKEN_TTL: Duration = Duration::hours(1);

/// Six-digit code sent in the verification email.
pub fn generate_verification_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

/// High-entropy token embedded in the password-reset link.
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; 20];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub fn verification_code_expiry() -> OffsetDateTime {
    OffsetDateTime::now_utc() + VERIFICATION_CODE_TTL
}

pub fn reset_token_expiry() -> OffsetDateTime {
    OffsetDateTime::now_utc() + RESET_TOKEN_TTL
}
