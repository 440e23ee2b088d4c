//! Colaborador de storage: carga/guarda el `FlowSnapshot` de una sesión.

mod store;

pub use store::{ContextStorage, InMemoryContextStorage};
