//! Command-line interface for the `dedup-bench` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings and the shared `DISPLAY_LEVEL` atomic with its display macros. |
//! | [`args`]      | `Args`: clap parser plus the conversions into seed, workloads, variants and `BenchConfig`. |

pub mod args;
pub mod constants;
