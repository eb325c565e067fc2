// Declare submodules
mod common;
mod synthesis;

pub use common::*;
pub use synthesis::section_synthesis_prompt;
