// Integration tests for cli/constants.rs — identity strings and display level.

use dedup_append::cli::constants::{display_level, set_display_level, ENV_SEED, PROGRAM_NAME};

#[test]
fn identity_strings() {
    assert_eq!(PROGRAM_NAME, "dedup-bench");
    assert_eq!(ENV_SEED, "DEDUP_BENCH_SEED");
}

#[test]
fn display_level_is_settable() {
    let prev = display_level();
    set_display_level(0);
    assert_eq!(display_level(), 0);
    dedup_append::displaylevel!(1, "must not print\n");
    set_display_level(prev);
}
