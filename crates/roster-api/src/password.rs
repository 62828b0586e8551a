use axum::extract::Path;
use rand::Rng;

use crate::error::ApiError;

/// Passwords are drawn from the 94 printable ASCII characters starting at `!`.
const FIRST_CHAR: u8 = b'!';
const CHAR_SPAN: u8 = 94;

pub const MAX_PASSWORD_LENGTH: usize = 64;

pub fn random_password(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| (FIRST_CHAR + rng.random_range(0..CHAR_SPAN)) as char)
        .collect()
}

/// GET /v1/password/{length}
pub async fn generate(Path(length): Path<usize>) -> Result<String, ApiError> {
    if length == 0 || length > MAX_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "length must be between 1 and {MAX_PASSWORD_LENGTH}"
        )));
    }
    Ok(random_password(length))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passwords_are_printable_ascii_of_requested_length() {
        for len in [1, 8, MAX_PASSWORD_LENGTH] {
            let pw = random_password(len);
            assert_eq!(pw.len(), len);
            assert!(pw.bytes().all(|b| (b'!'..=b'~').contains(&b)));
        }
    }
}
