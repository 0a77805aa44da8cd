//! Compile the emergency-stop latch, print its instructions, and draw it back.
//!
//! Run with: `cargo run -p ladder_logic_core --example latch`

use ladder_logic_core::{LadderError, build_trees, compile, decompile, to_pretty_json};

const LATCH: &str = "\
!! a latch with an emergency stop !!
||--[/ESTOP]----[/STOP]----+--[START]--+------(RUN)-----||
||                         |           |                ||
||                         +---[RUN]---+                ||
||                                                      ||
||--[RUN]-------------------------------------(MOTOR)---||";

fn main() -> Result<(), LadderError> {
    let program = compile(LATCH)?;

    println!("── instructions ({}) ──", program.len());
    for instruction in &program {
        println!("  {instruction}");
    }

    println!("── trees ──");
    println!("{}", to_pretty_json(&build_trees(&program)?));

    println!("── redrawn ──");
    println!("{}", decompile(&program)?);
    Ok(())
}
