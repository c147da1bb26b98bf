//! Валидация payload'ов на границе regen authority

use thiserror::Error;

/// Отклонённый payload. Не fatal: systems логируют и пропускают событие.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidInput {
    #[error("amount must be positive")]
    ZeroAmount,

    #[error("regen duration must be a positive number of seconds, got {0}")]
    NonPositiveDuration(f32),
}

pub fn validate_amount(amount: u32) -> Result<u32, InvalidInput> {
    if amount == 0 {
        return Err(InvalidInput::ZeroAmount);
    }
    Ok(amount)
}

pub fn validate_duration(duration_secs: f32) -> Result<f32, InvalidInput> {
    // is_finite() == false и для NaN
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Err(InvalidInput::NonPositiveDuration(duration_secs));
    }
    Ok(duration_secs)
}
