//! Path template expansion
//!
//! Output names in crop plans and answer keys are written as templates such
//! as `images/non-verbal-reasoning/{test}/q{n}.png`. Placeholders are
//! `{name}` with an alphanumeric name; anything not supplied by the caller is
//! rejected instead of being left in the path.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::errors::{ExamError, ExamResult};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}")
        .expect("placeholder pattern is a valid regex");
}

/// Names of all placeholders used in `template`, in order of appearance
pub fn placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Replace every placeholder in `template` with its value from `values`
///
/// # Returns
/// The expanded string, or a `Config` error naming the first placeholder
/// with no value
pub fn expand(template: &str, values: &[(&str, &str)]) -> ExamResult<String> {
    if let Some(unknown) = placeholders(template)
        .into_iter()
        .find(|name| !values.iter().any(|(key, _)| *key == name.as_str()))
    {
        return Err(ExamError::Config(format!(
            "Unknown placeholder {{{}}} in template \"{}\"",
            unknown, template
        )));
    }

    let expanded = PLACEHOLDER.replace_all(template, |caps: &Captures| {
        values
            .iter()
            .find(|(key, _)| *key == &caps[1])
            .map(|(_, value)| value.to_string())
            .unwrap_or_default()
    });

    Ok(expanded.into_owned())
}

/// Check that `template` uses `name`, so each expansion is distinct
pub fn require_placeholder(template: &str, name: &str) -> ExamResult<()> {
    if placeholders(template).iter().any(|p| p == name) {
        Ok(())
    } else {
        Err(ExamError::Config(format!(
            "Template \"{}\" must contain {{{}}}",
            template, name
        )))
    }
}
