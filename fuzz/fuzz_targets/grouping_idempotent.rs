//! Grouping idempotence fuzzer.
//!
//! Generates SQL-like scripts and checks that regrouping an already grouped
//! statement leaves the tree unchanged.

use honggfuzz::fuzz;
use sqlparse_rs::testing::{FuzzScript, test_grouping_idempotent};

fn main() {
    loop {
        fuzz!(|script: FuzzScript| {
            test_grouping_idempotent(&script.to_sql());
        });
    }
}
