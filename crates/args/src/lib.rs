mod cli_parser;
mod filters;

pub use cli_parser::*;
pub use filters::*;

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <bootstrap-servers> [-states <state1> <state2> ...] [-types <type1> <type2> ...]"
    )
}
