//! Contrato del almacenamiento durable
//!
//! El núcleo solo necesita un almacén clave-valor: cada colección se guarda
//! como un arreglo JSON bajo su nombre.

use crate::utils::errors::AppResult;

pub trait DurableStore {
    /// Leer el valor de una clave; `None` si nunca se escribió
    fn read(&self, key: &str) -> AppResult<Option<String>>;

    /// Escribir varias claves juntas
    fn write_all(&mut self, entries: &[(&str, String)]) -> AppResult<()>;

    /// Eliminar claves; las ausentes se ignoran
    fn remove_all(&mut self, keys: &[&str]) -> AppResult<()>;

    /// Descripción corta para logs
    fn describe(&self) -> String;
}
