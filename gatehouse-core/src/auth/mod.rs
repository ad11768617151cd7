//! Password cryptography for the account service.

pub mod crypto;

pub use crypto::{CryptoError, PasswordCrypto};
