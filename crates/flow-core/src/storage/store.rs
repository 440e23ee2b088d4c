use dashmap::DashMap;

use crate::errors::CoreFlowError;
use crate::model::{FlowSnapshot, SessionKey};

/// Almacenamiento síncrono de snapshots por (sesión, escenario).
///
/// Se invoca al inicio y al final de cada petición; implementaciones deben
/// tolerar peticiones concurrentes de sesiones distintas.
pub trait ContextStorage: Send + Sync {
    fn load(&self, key: &SessionKey) -> Result<Option<FlowSnapshot>, CoreFlowError>;
    fn save(&self, key: &SessionKey, snapshot: &FlowSnapshot) -> Result<(), CoreFlowError>;
    /// Elimina el snapshot; no es error si no existía.
    fn remove(&self, key: &SessionKey) -> Result<(), CoreFlowError>;
}

#[derive(Debug, Default)]
pub struct InMemoryContextStorage {
    inner: DashMap<SessionKey, FlowSnapshot>,
}

impl InMemoryContextStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl ContextStorage for InMemoryContextStorage {
    fn load(&self, key: &SessionKey) -> Result<Option<FlowSnapshot>, CoreFlowError> {
        Ok(self.inner.get(key).map(|entry| entry.value().clone()))
    }

    fn save(&self, key: &SessionKey, snapshot: &FlowSnapshot) -> Result<(), CoreFlowError> {
        self.inner.insert(key.clone(), snapshot.clone());
        Ok(())
    }

    fn remove(&self, key: &SessionKey) -> Result<(), CoreFlowError> {
        self.inner.remove(key);
        Ok(())
    }
}

impl<S: ContextStorage + ?Sized> ContextStorage for Box<S> {
    fn load(&self, key: &SessionKey) -> Result<Option<FlowSnapshot>, CoreFlowError> {
        (**self).load(key)
    }

    fn save(&self, key: &SessionKey, snapshot: &FlowSnapshot) -> Result<(), CoreFlowError> {
        (**self).save(key, snapshot)
    }

    fn remove(&self, key: &SessionKey) -> Result<(), CoreFlowError> {
        (**self).remove(key)
    }
}
