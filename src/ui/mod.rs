pub mod output;
pub mod prompt;

pub use output::{OutputFormatter, OutputMode};
pub use prompt::{prompt_for_roots, prompt_for_roots_interactive};
