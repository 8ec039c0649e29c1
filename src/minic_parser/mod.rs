pub mod parser;
pub mod tokenizer;

pub mod errors;
pub mod input_stream;
pub mod token;

pub mod node;
pub mod node_arena;
