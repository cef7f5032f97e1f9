//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_credential_hasher;
mod in_memory_document_store;
mod in_memory_identity_provider;
mod in_memory_profile_store;

pub use argon2_credential_hasher::Argon2CredentialHasher;
pub use in_memory_document_store::InMemoryDocumentStore;
pub use in_memory_identity_provider::InMemoryIdentityProvider;
pub use in_memory_profile_store::InMemoryProfileStore;
