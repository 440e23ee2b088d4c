//! Colaborador de navegación: convierte nombres de ruta + parámetros en
//! direcciones.

mod router;

pub use router::{PathRouter, RouteGenerator, RouteParams};
