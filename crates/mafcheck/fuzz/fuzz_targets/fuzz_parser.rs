//! Fuzz target for the MAF parser.

#![no_main]

use libfuzzer_sys::fuzz_target;
use mafcheck::input::Parser;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    if let Ok(table) = parser.parse_bytes(data) {
        for row in 0..table.row_count() {
            let _ = table.row_map(row);
        }
    }
});
