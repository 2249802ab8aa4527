/*
    Membership testing for grammars in Chomsky normal form with the CYK
    chart parser
*/

pub mod error_handling;
pub mod grammar;
pub mod validator;
pub mod cyk;
pub mod parser;
pub mod generator;
