mod builder_test;
mod parser_test;
