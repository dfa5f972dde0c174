pub mod budget;
pub mod data;
pub mod expense;
pub mod fixed;
pub mod system;

use crate::cli::context::CommandError;
use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        budget::definitions(),
        fixed::definitions(),
        expense::definitions(),
        data::definitions(),
        system::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}

/// Converts a 1-based row number typed by the user into a vector index.
pub(crate) fn parse_index(raw: &str) -> Result<usize, CommandError> {
    match raw.parse::<usize>() {
        Ok(number) if number >= 1 => Ok(number - 1),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{raw}` is not a row number (rows start at 1)"
        ))),
    }
}

pub(crate) fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CommandError::InvalidArguments(format!("`{raw}` is not a number")))
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("Usage: {usage}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_numbers_are_one_based() {
        assert_eq!(parse_index("1").unwrap(), 0);
        assert!(parse_index("0").is_err());
        assert!(parse_index("-2").is_err());
    }

    #[test]
    fn amounts_must_be_finite_numbers() {
        assert_eq!(parse_amount(" 12.5 ").unwrap(), 12.5);
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("ten").is_err());
    }
}
