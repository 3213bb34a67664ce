//! Application layer: the form session that ties the records, the rules and
//! the ports together.
//!
//! `FormSession` is the entry point. It owns one form, asks the user through
//! a `Prompter` before destructive edits, and hands validated forms to a
//! `SubmissionGateway`, never more than one at a time.

pub mod session;
