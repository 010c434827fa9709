//! Fuzz target for whole-file validation.
//!
//! Any input that parses must validate without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use mafcheck::{GeneReferenceEntry, GeneReferenceTable, MafValidator, ValidatorConfig};

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let genes = GeneReferenceTable::from_entries([
        GeneReferenceEntry::new("TP53", 7157),
        GeneReferenceEntry::new("KRAS", 3845).with_aliases(["KRAS2"]),
    ]);
    let validator = MafValidator::with_config(ValidatorConfig {
        parallel: false,
        ..Default::default()
    });
    let _ = validator.validate_bytes(data, Some(&genes), None);
});
