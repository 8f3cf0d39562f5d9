//! Losslessness fuzzer for the lexer, splitter and generic grouping.
//!
//! Feeds arbitrary text through the generic parser and checks that the
//! leaves of every produced statement reproduce the input exactly.

use honggfuzz::fuzz;
use sqlparse_rs::testing::test_lossless;

fn main() {
    loop {
        fuzz!(|sql: String| {
            test_lossless(&sql);
        });
    }
}
