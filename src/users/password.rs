use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Turns plaintext passwords into verifiable credentials.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plain: &str) -> anyhow::Result<String>;
    fn verify(&self, plain: &str, credential: &str) -> anyhow::Result<bool>;
}

#[derive(Clone, Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    /// Minimum-cost parameters; only for tests where hashing speed matters.
    #[cfg(test)]
    pub fn fast() -> Self {
        use argon2::{Algorithm, Params, Version};
        let params = Params::new(
            Params::MIN_M_COST,
            Params::MIN_T_COST,
            Params::MIN_P_COST,
            None,
        )
        .expect("minimum argon2 params are valid");
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plain: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, "argon2 hash_password error");
                anyhow::anyhow!(e.to_string())
            })?
            .to_string();
        Ok(hash)
    }

    // Cost parameters come from the PHC string, not from `self`.
    fn verify(&self, plain: &str, credential: &str) -> anyhow::Result<bool> {
        let parsed = PasswordHash::new(credential).map_err(|e| {
            error!(error = %e, "argon2 parse hash error");
            anyhow::anyhow!(e.to_string())
        })?;
        Ok(self
            .argon2
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok())
    }
}
