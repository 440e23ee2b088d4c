//! Modelos neutrales intercambiados con los colaboradores externos
//! (Output, FlowRequest, FlowSnapshot).

pub mod output;
pub mod request;
pub mod snapshot;

pub use output::Output;
pub use request::FlowRequest;
pub use snapshot::{FlowSnapshot, SessionKey};
