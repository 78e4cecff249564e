//! Text of the labels printed around the diagram

use crate::domain::{Fraction, MixedForm};

/// Separator between the mixed form and the reduced remainder
pub const SEPARATOR: &str = " — ";

pub fn original(fraction: &Fraction) -> String {
    format!("Original: {fraction}")
}

pub fn simplified(fraction: &Fraction) -> String {
    format!("Simplified (abs): {}", fraction.simplify())
}

/// `Mixed: ...` and `Remainder reduced: ...` joined on one line
pub fn mixed_and_remainder(mixed: &MixedForm) -> String {
    format!(
        "Mixed: {mixed}{SEPARATOR}Remainder reduced: {}",
        mixed.reduced_remainder()
    )
}

/// Note above the circle, only when more than one whole unit is represented
pub fn whole_units(mixed: &MixedForm) -> Option<String> {
    (mixed.whole > 1).then(|| {
        format!(
            "(Represents {} whole circle(s): drawn 1 circle + remainder)",
            mixed.whole
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    #[test]
    fn test_labels_for_improper_fraction() {
        let f = frac(7, 4);
        assert_eq!(original(&f), "Original: 7/4");
        assert_eq!(simplified(&f), "Simplified (abs): 7/4");
        assert_eq!(
            mixed_and_remainder(&f.to_mixed()),
            "Mixed: 1 3/4 — Remainder reduced: 3/4"
        );
        assert_eq!(whole_units(&f.to_mixed()), None);
    }

    #[test]
    fn test_labels_for_negative_proper_fraction() {
        let f = frac(-6, 8);
        assert_eq!(original(&f), "Original: -6/8");
        assert_eq!(simplified(&f), "Simplified (abs): 3/4");
        assert_eq!(
            mixed_and_remainder(&f.to_mixed()),
            "Mixed: -6/8 — Remainder reduced: 3/4"
        );
    }

    #[test]
    fn test_labels_for_whole_number() {
        let f = frac(6, 3);
        assert_eq!(
            mixed_and_remainder(&f.to_mixed()),
            "Mixed: 2 — Remainder reduced: 0/1"
        );
        assert_eq!(
            whole_units(&f.to_mixed()).as_deref(),
            Some("(Represents 2 whole circle(s): drawn 1 circle + remainder)")
        );
        assert_eq!(whole_units(&frac(4, 4).to_mixed()), None);
    }
}
