use minic_engine::minic_parser::input_stream::InputStream;
use minic_engine::minic_parser::parser::program::Program;
use minic_engine::minic_parser::parser::Parser;
use minic_engine::minic_parser::tokenizer::Tokenizer;
use std::fs::File;
use std::process::exit;
use std::{env, io};

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: parser_test <source-file>");
        exit(1);
    }

    let file = File::open(&args[1])?;
    let mut is = InputStream::new();
    is.read_from_file(file, None)?;

    let mut tokenizer = Tokenizer::new(&mut is);
    let tokens = match tokenizer.tokenize() {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };

    let mut program = Program::new();
    let mut parser = Parser::new(tokens, &mut program);
    if let Err(e) = parser.parse() {
        eprintln!("{}", e);
        exit(1);
    }

    println!("Generated tree: \n\n{}", program);
    Ok(())
}
