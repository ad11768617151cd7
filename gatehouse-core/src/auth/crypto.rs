use argon2::{
    Algorithm, Argon2, Params, ParamsBuilder, Version,
    password_hash::{Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, Salt, SaltString},
};
use rand::{TryRngCore, rngs::OsRng};
use thiserror::Error;
use zeroize::Zeroizing;

/// Password hashing helper for the credential store.
///
/// Wraps Argon2id with fixed parameters and a server-side pepper that is
/// appended to the password before hashing. Keeping the primitive in one
/// place guarantees consistent parameter choices and leaves room to rotate
/// the pepper later.
#[derive(Debug)]
pub struct PasswordCrypto {
    argon2: Argon2<'static>,
    pepper: Zeroizing<Vec<u8>>,
}

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("password pepper must not be empty")]
    EmptyPepper,
    #[error("invalid Argon2 parameters: {0}")]
    InvalidParams(String),
    #[error("password hashing error: {0}")]
    Hash(String),
}

impl From<PasswordHashError> for CryptoError {
    fn from(err: PasswordHashError) -> Self {
        CryptoError::Hash(err.to_string())
    }
}

impl PasswordCrypto {
    /// Defaults target ~64 MiB memory and 3 iterations, a solid server
    /// baseline well above the bcrypt cost-10 work factor.
    const DEFAULT_MEMORY_KIB: u32 = 64 * 1024; // 64 MiB
    const DEFAULT_ITERATIONS: u32 = 3;
    const DEFAULT_PARALLELISM: u32 = 1;
    const SALT_LENGTH: usize = Salt::RECOMMENDED_LENGTH;

    /// Build a helper with the default Argon2id parameters.
    pub fn new(pepper: impl AsRef<[u8]>) -> Result<Self, CryptoError> {
        Self::with_params(
            pepper,
            ParamsBuilder::new()
                .m_cost(Self::DEFAULT_MEMORY_KIB)
                .t_cost(Self::DEFAULT_ITERATIONS)
                .p_cost(Self::DEFAULT_PARALLELISM)
                .output_len(32)
                .build()
                .map_err(|err| CryptoError::InvalidParams(err.to_string()))?,
        )
    }

    /// Build a helper with caller-specified Argon2 parameters (useful for
    /// tests or constrained environments).
    pub fn with_params(
        pepper: impl AsRef<[u8]>,
        params: Params,
    ) -> Result<Self, CryptoError> {
        let pepper = pepper.as_ref();
        if pepper.is_empty() {
            return Err(CryptoError::EmptyPepper);
        }

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::default(), params);

        Ok(Self {
            argon2,
            pepper: Zeroizing::new(pepper.to_vec()),
        })
    }

    /// Hash a password using Argon2id with a random salt and the shared
    /// pepper. The resulting PHC string is suitable for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, CryptoError> {
        let material = self.peppered(password);

        // Use the workspace's rand crate so minimal builds avoid depending on
        // password_hash's optional rand_core shim.
        let mut salt_bytes = [0u8; Self::SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|err| CryptoError::Hash(err.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(CryptoError::from)?;
        let hash = self.argon2.hash_password(&material, &salt)?.to_string();
        Ok(hash)
    }

    /// Verify a password against a stored hash, applying the shared pepper.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, CryptoError> {
        let parsed = PasswordHash::new(password_hash)?;
        let material = self.peppered(password);
        Ok(self.argon2.verify_password(&material, &parsed).is_ok())
    }

    fn peppered(&self, password: &str) -> Zeroizing<Vec<u8>> {
        let mut material =
            Zeroizing::new(Vec::with_capacity(password.len() + self.pepper.len()));
        material.extend_from_slice(password.as_bytes());
        material.extend_from_slice(&self.pepper);
        material
    }
}
