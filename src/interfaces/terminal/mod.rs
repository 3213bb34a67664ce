//! Interactive terminal front end: a console that doubles as the dialog
//! prompter, the command grammar, and the read-eval loop.

pub mod command;
pub mod console;
pub mod repl;
