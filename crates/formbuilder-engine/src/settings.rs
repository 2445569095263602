use serde::{Deserialize, Serialize};

/// Engine-wide settings for one open form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub recalc: RecalcSettings,
    pub validation: ValidationOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecalcSettings {
    /// Maximum number of recompute passes before a form is reported as not converging.
    ///
    /// An acyclic chain of derived fields `n` deep settles in `n + 1` passes; forms without a
    /// parent cycle always get at least that many, so the cap only stops cyclic forms.
    pub max_passes: u32,
}

impl Default for RecalcSettings {
    fn default() -> Self {
        Self { max_passes: 100 }
    }
}

/// Policies applied by the derived-field validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Reject configs that would make a field (transitively) its own parent.
    pub reject_cycles: bool,
    /// Require `calculateAge`'s parent to be a `date` field or hold a parseable date.
    ///
    /// Off by default: any field is accepted and non-dates evaluate to an empty value.
    pub strict_age_parent: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            reject_cycles: true,
            strict_age_parent: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_members_fall_back_to_defaults() {
        let settings: EngineSettings =
            serde_json::from_str(r#"{ "validation": { "strict_age_parent": true } }"#).unwrap();
        assert_eq!(settings.recalc.max_passes, 100);
        assert!(settings.validation.reject_cycles);
        assert!(settings.validation.strict_age_parent);
    }
}
