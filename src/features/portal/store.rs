use crate::modules::api::DocumentMetadata;

/// Client-side snapshot of the server's document collection.
///
/// Replaced wholesale after every successful list; records are never patched
/// in place, and server order is preserved as received.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: Vec<DocumentMetadata>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a fresh snapshot.
    pub fn replace_all(&mut self, documents: Vec<DocumentMetadata>) {
        self.documents = documents;
    }

    pub fn get(&self, id: i64) -> Option<&DocumentMetadata> {
        self.documents.iter().find(|document| document.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentMetadata> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
