// src/bin/aim_angle.rs
use aim_errors::{cli::main_for, scenario::Scenario};
use std::process::ExitCode;

fn main() -> ExitCode {
    main_for(Scenario::aim_angle())
}
