pub mod git;
pub mod openai;
pub mod terminal;
