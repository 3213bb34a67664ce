//! Domain layer: the records a registration form is made of, the rules they
//! must satisfy before submission, and the ports the application talks to.

pub mod beneficiary;
pub mod form;
pub mod general;
pub mod payload;
pub mod ports;
pub mod validation;
