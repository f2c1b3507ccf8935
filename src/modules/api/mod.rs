//! Client for the document service HTTP contract
//!
//! | Operation | Method & Path |
//! |-----------|----------------------------|
//! | List | GET `/documents` |
//! | Upload | POST `/documents/upload` |
//! | Download | GET `/documents/{id}` |
//! | Delete | DELETE `/documents/{id}` |

mod document_client;

pub use document_client::{DocumentApi, DocumentMetadata, DocumentServiceClient, UploadReceipt};
