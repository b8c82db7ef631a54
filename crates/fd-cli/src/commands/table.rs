use fd_core::{DiceSet, ProbabilityMatrix};

use crate::console::render_help;

pub fn run(dice: &DiceSet) -> Result<(), String> {
    let matrix = ProbabilityMatrix::compute(dice);
    print!("{}", render_help(dice, &matrix));
    Ok(())
}
