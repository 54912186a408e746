//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256/512, Base64, constant-time compare)
//! - Password hashing (salted, iterated SHA-512 digests)
//! - Payload encryption (AES-256-CBC with a hash-derived key)

pub mod cipher;
pub mod crypto;
pub mod password;
