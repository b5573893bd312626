use anyhow::anyhow;
use rand::RngCore;
use rand::rngs::OsRng;

use crate::utils::errors::AppError;

const CODE_MIN: u32 = 100_000;
const CODE_SPAN: u32 = 900_000;

/// Draws a six-digit confirmation/reset code from the OS entropy source.
///
/// Values are uniform over `100000..=999999`: raw draws past the largest
/// multiple of the span are rejected and redrawn instead of folded in.
pub fn generate_code() -> Result<String, AppError> {
    const ZONE: u32 = u32::MAX - (u32::MAX % CODE_SPAN);

    let mut buf = [0u8; 4];
    loop {
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| AppError::internal(anyhow!("entropy source failed: {}", e)))?;

        let raw = u32::from_be_bytes(buf);
        if raw < ZONE {
            return Ok((CODE_MIN + raw % CODE_SPAN).to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_six_digits() {
        for _ in 0..1000 {
            let code = generate_code().unwrap();
            assert_eq!(code.len(), 6);
            let n: u32 = code.parse().unwrap();
            assert!((100_000..=999_999).contains(&n));
        }
    }
}
