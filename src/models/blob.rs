//! Referencias a blobs (fotos, documentos escaneados)
//!
//! El núcleo nunca interpreta el contenido de un blob: solo guarda la
//! referencia opaca que produjo el colaborador de presentación.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};

/// Referencia opaca a una imagen o documento capturado
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobRef(String);

impl BlobRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for BlobRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for BlobRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Convierte un archivo capturado en una referencia almacenable
pub trait BlobResolver {
    fn resolve(&self, mime_type: &str, bytes: &[u8]) -> BlobRef;
}

/// Resolver por defecto: `data:<mime>;base64,<payload>`
#[derive(Debug, Default, Clone, Copy)]
pub struct DataUrlResolver;

impl BlobResolver for DataUrlResolver {
    fn resolve(&self, mime_type: &str, bytes: &[u8]) -> BlobRef {
        BlobRef(format!("data:{};base64,{}", mime_type, BASE64.encode(bytes)))
    }
}

/// Política de edición para secuencias de blobs.
///
/// Al crear siempre se guarda lo recién capturado; al editar la política
/// decide si lo nuevo se agrega o sustituye lo almacenado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobMerge {
    /// Agregar al final de la secuencia existente
    Append,
    /// Sustituir solo si se capturó algo nuevo
    ReplaceIfProvided,
}

impl BlobMerge {
    pub fn apply(self, existing: &[BlobRef], captured: Vec<BlobRef>) -> Vec<BlobRef> {
        match self {
            BlobMerge::Append => {
                let mut merged = existing.to_vec();
                merged.extend(captured);
                merged
            }
            BlobMerge::ReplaceIfProvided if captured.is_empty() => existing.to_vec(),
            BlobMerge::ReplaceIfProvided => captured,
        }
    }
}

/// Campos de una sola imagen: lo capturado sustituye, si no se conserva
pub fn replace_single(existing: Option<&BlobRef>, captured: Option<BlobRef>) -> Option<BlobRef> {
    captured.or_else(|| existing.cloned())
}

/// Deserializa una imagen única; `""` se interpreta como ausente
pub fn deserialize_optional_blob<'de, D>(deserializer: D) -> Result<Option<BlobRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|r| !r.is_empty()).map(BlobRef))
}
