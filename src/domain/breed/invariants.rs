use super::entity::{BreedClass, ClassMember, Classification};
use crate::domain::{DomainError, DomainResult};

/// Validates a breed class row before it enters the vocabulary
pub fn validate_breed_class(class: &BreedClass) -> DomainResult<()> {
    if class.class_id.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Breed class identifier cannot be empty".to_string(),
        ));
    }
    if class.aliases().next().is_none() {
        return Err(DomainError::InvariantViolation(format!(
            "Breed class {} has no usable label",
            class.class_id
        )));
    }
    Ok(())
}

/// Validates a member before it can be offered for selection
pub fn validate_class_member(member: &ClassMember) -> DomainResult<()> {
    if member.filename.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Member locator cannot be empty".to_string(),
        ));
    }
    validate_confidence(member.confidence)
}

/// Validates a classification row before it is stored
pub fn validate_classification(classification: &Classification) -> DomainResult<()> {
    validate_breed_class(&BreedClass::new(
        classification.class_id.as_str(),
        classification.class_name.as_str(),
    ))?;
    validate_confidence(classification.probability)
}

/// Confidence must be a finite number in [0, 1]
fn validate_confidence(confidence: f64) -> DomainResult<()> {
    if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
        return Err(DomainError::InvariantViolation(format!(
            "Confidence {} is outside [0, 1]",
            confidence
        )));
    }
    Ok(())
}

/// Invariants that must hold true for the breed domain:
///
/// 1. Every class has a non-empty identifier
/// 2. Every class yields at least one alias
/// 3. Member confidence is finite and bounded to [0, 1]
/// 4. Members below the floor are never eligible

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_class() {
        let class = BreedClass::new("id1", "Golden Retriever, Golden");
        assert!(validate_breed_class(&class).is_ok());
    }

    #[test]
    fn test_class_without_labels_fails() {
        let class = BreedClass::new("id1", " , ");
        assert!(validate_breed_class(&class).is_err());
    }

    #[test]
    fn test_confidence_bounds() {
        assert!(validate_class_member(&ClassMember::new("a.jpg", 0.0)).is_ok());
        assert!(validate_class_member(&ClassMember::new("a.jpg", 1.0)).is_ok());
        assert!(validate_class_member(&ClassMember::new("a.jpg", -0.1)).is_err());
        assert!(validate_class_member(&ClassMember::new("a.jpg", 1.5)).is_err());
        assert!(validate_class_member(&ClassMember::new("a.jpg", f64::NAN)).is_err());
    }

    #[test]
    fn test_classification_validation() {
        let ok = Classification {
            image_id: "img".to_string(),
            class_id: "id1".to_string(),
            class_name: "Pug".to_string(),
            probability: 0.8,
        };
        assert!(validate_classification(&ok).is_ok());

        let bad = Classification { probability: 2.0, ..ok };
        assert!(validate_classification(&bad).is_err());
    }
}
