pub mod play;
pub mod table;

use fd_core::DiceSet;

const USAGE_EXAMPLE: &str = "Example: fairdice 2,2,4,4,9,9 1,1,6,6,8,8 3,3,5,5,7,7\n\
Dice starting with '-' go after '--': fairdice -- -1,2,3,4,5,6 1,1,6,6,8,8 3,3,5,5,7,7";

/// Parse the positional dice arguments, adding a usage example to errors.
pub fn parse_dice(args: &[String]) -> Result<DiceSet, String> {
    DiceSet::parse(args).map_err(|e| format!("{e}\n{USAGE_EXAMPLE}"))
}
