//! Detector sets for common configurations.

use crate::{
    ArgumentDetector, AssignDetector, CaseDetector, ConditionDetector, OperationDetector,
    ReturnDetector,
};
use mnd_core::{CheckKind, DetectorBox};

/// Returns the detector for one check.
#[must_use]
pub fn detector_for(check: CheckKind) -> DetectorBox {
    match check {
        CheckKind::Argument => Box::new(ArgumentDetector::new()),
        CheckKind::Assign => Box::new(AssignDetector::new()),
        CheckKind::Case => Box::new(CaseDetector::new()),
        CheckKind::Condition => Box::new(ConditionDetector::new()),
        CheckKind::Operation => Box::new(OperationDetector::new()),
        CheckKind::Return => Box::new(ReturnDetector::new()),
    }
}

/// Returns all available detectors, in check-code order.
#[must_use]
pub fn all_detectors() -> Vec<DetectorBox> {
    CheckKind::ALL.iter().copied().map(detector_for).collect()
}

/// Returns detectors for the given checks, without duplicates.
#[must_use]
pub fn selected_detectors(checks: &[CheckKind]) -> Vec<DetectorBox> {
    let mut checks = checks.to_vec();
    checks.sort_unstable();
    checks.dedup();
    checks.into_iter().map(detector_for).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_detectors_cover_every_check() {
        let codes: Vec<&str> = all_detectors().iter().map(|d| d.code()).collect();
        assert_eq!(
            codes,
            vec!["MND001", "MND002", "MND003", "MND004", "MND005", "MND006"]
        );
    }

    #[test]
    fn every_detector_has_a_description() {
        assert!(all_detectors().iter().all(|d| !d.description().is_empty()));
    }

    #[test]
    fn selected_detectors_deduplicate() {
        let detectors =
            selected_detectors(&[CheckKind::Return, CheckKind::Argument, CheckKind::Return]);
        let names: Vec<&str> = detectors.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["argument", "return"]);
    }
}
