use crate::domain::models::{
    event::EventDraft,
    patch::DraftPatch,
    restriction::{RestrictionSet, RestrictionWarning},
};
use tracing::warn;

/// Corrects `patch` against the edit constraints of `original`.
///
/// Locked fields fall back to the original value; numeric fields with a
/// minimum are clamped up to it, and so are blank or unparseable values. Applying the result a second time changes
/// nothing and produces no further warnings.
pub fn apply_restrictions(
    original: &EventDraft,
    patch: DraftPatch,
    restrictions: &RestrictionSet,
) -> (DraftPatch, Vec<RestrictionWarning>) {
    let mut corrected = patch;
    let mut warnings = Vec::new();

    for (&field, restriction) in restrictions.iter() {
        if !corrected.touches(field) {
            continue;
        }

        if !restriction.can_edit {
            if corrected.restore_from(field, original) {
                warn!("Discarded edit of locked field {}", field);
                warnings.push(RestrictionWarning::Locked { field });
            }
            continue;
        }

        if let Some(minimum) = restriction.min_value {
            if let Some(value) = corrected.numeric_text_mut(field) {
                // Blank or non-numeric input counts as below the minimum.
                let below_minimum = !value
                    .trim()
                    .parse::<f64>()
                    .is_ok_and(|requested| requested.is_finite() && requested >= minimum as f64);

                if below_minimum {
                    warn!("Clamped {} from {} to minimum {}", field, value, minimum);
                    warnings.push(RestrictionWarning::Clamped {
                        field,
                        requested: value.clone(),
                        minimum,
                    });
                    *value = minimum.to_string();
                }
            }
        }
    }

    (corrected, warnings)
}
