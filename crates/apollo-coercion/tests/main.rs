mod diagnostic;
mod fixtures;
mod literal;
mod parser;
mod response;
mod validation;
