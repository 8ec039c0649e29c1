pub mod minic_parser;
