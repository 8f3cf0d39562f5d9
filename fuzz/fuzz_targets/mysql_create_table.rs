//! MySQL `CREATE TABLE` analyzer fuzzer.
//!
//! Generates scripts from `CREATE TABLE`-flavored fragments and checks that
//! the analyzer never panics and that every catalog it builds is consistent.

use honggfuzz::fuzz;
use sqlparse_rs::testing::{FuzzScript, test_mysql_parse};

fn main() {
    loop {
        fuzz!(|script: FuzzScript| {
            test_mysql_parse(&script.to_sql());
        });
    }
}
