// src/bin/projectile_range.rs
use aim_errors::{cli::main_for, scenario::Scenario};
use std::process::ExitCode;

fn main() -> ExitCode {
    main_for(Scenario::projectile_range())
}
