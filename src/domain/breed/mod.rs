pub mod entity;
pub mod invariants;

pub use entity::{BreedClass, ClassMember, Classification, Image, ALIAS_SEPARATOR};
pub use invariants::{validate_breed_class, validate_class_member, validate_classification};
