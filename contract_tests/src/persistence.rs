//! Persistence contract tests
//!
//! These pin the end-to-end journey of a metadata record: object state to
//! wire bytes and back into a fresh object, plus the stability of the byte
//! layout itself.
