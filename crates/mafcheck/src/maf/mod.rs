//! Mutation Annotation Format (MAF) data model.

pub mod columns;
mod record;

pub use record::{
    MutationRecord, MutationStatus, ValidationAlleles, ValidationStatus, VariantClassification,
    VariantType,
};
