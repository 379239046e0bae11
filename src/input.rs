use crate::models::RawCount;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("steps must be a whole number of zero or more")]
    InvalidSteps,
    #[error("goal must be a whole number greater than zero")]
    InvalidGoal,
}

pub fn parse_steps(raw: &RawCount) -> Result<u64, InputError> {
    parse_count(raw).ok_or(InputError::InvalidSteps)
}

pub fn parse_goal(raw: &RawCount) -> Result<u64, InputError> {
    parse_count(raw)
        .filter(|goal| *goal > 0)
        .ok_or(InputError::InvalidGoal)
}

fn parse_count(raw: &RawCount) -> Option<u64> {
    match raw {
        RawCount::Number(number) => number.as_u64(),
        RawCount::Text(text) => {
            let text = text.trim();
            if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
                return None;
            }
            text.parse().ok()
        }
        RawCount::Other(_) => None,
    }
}
