//! Per-field validation reporting.
//!
//! Write DTOs in `listou-db` derive `validator::Validate`; this module turns
//! the resulting [`validator::ValidationErrors`] into the flat, sorted
//! [`Violations`] list that validation error responses carry. It also hosts
//! the custom rules the derive attributes reference.

use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Violation types
// ---------------------------------------------------------------------------

/// A single failed constraint on a named field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Every violation found in one validation pass, sorted by field name.
///
/// A rejected write reports all failing fields at once rather than stopping
/// at the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Violations(pub Vec<FieldViolation>);

impl Violations {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for v in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Flatten [`validator::ValidationErrors`] into a sorted [`Violations`] list.
///
/// Falls back to the rule code when a constraint carries no message.
pub fn violations_from(errors: &validator::ValidationErrors) -> Violations {
    let mut out: Vec<FieldViolation> = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for err in field_errors.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("invalid value (rule: {})", err.code));
            out.push(FieldViolation {
                field: field.to_string(),
                message,
            });
        }
    }
    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    Violations(out)
}

// ---------------------------------------------------------------------------
// Custom rules
// ---------------------------------------------------------------------------

/// Reject strings that are empty or whitespace-only.
///
/// `length(min = 1)` alone would accept `"   "`, which the shopping list
/// must not: a shop named three spaces renders as nothing in every client.
pub fn non_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("non_blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- non_blank -----------------------------------------------------------

    #[test]
    fn non_blank_accepts_text() {
        assert!(non_blank("Milk").is_ok());
    }

    #[test]
    fn non_blank_rejects_empty() {
        assert!(non_blank("").is_err());
    }

    #[test]
    fn non_blank_rejects_whitespace_only() {
        assert!(non_blank("   \t").is_err());
    }

    // -- Violations ----------------------------------------------------------

    #[test]
    fn violations_display_joins_fields() {
        let v = Violations(vec![
            FieldViolation {
                field: "name".into(),
                message: "must not be blank".into(),
            },
            FieldViolation {
                field: "comment".into(),
                message: "too long".into(),
            },
        ]);
        assert_eq!(v.to_string(), "name: must not be blank; comment: too long");
    }

    #[test]
    fn violations_from_sorts_and_keeps_messages() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(
                custom(function = non_blank),
                length(max = 4, message = "must be at most 4 characters")
            )]
            title: String,
            #[validate(custom(function = non_blank))]
            comment: String,
        }

        let probe = Probe {
            title: "too long".into(),
            comment: "  ".into(),
        };
        let errors = probe.validate().unwrap_err();

        let violations = violations_from(&errors);
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["comment", "title"]);
        assert_eq!(violations.0[0].message, "must not be blank");
        assert_eq!(violations.0[1].message, "must be at most 4 characters");
    }
}
