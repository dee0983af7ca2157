use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use tracing::error;

const MIN_COST: u32 = 1;
const MAX_COST: u32 = 14;
const ITERATIONS: u32 = 3;

/// Argon2id hashing with a bcrypt-style log2 cost factor.
///
/// A cost of `c` uses `2^(c + 4)` KiB of memory, so the default of 10 lands
/// at 16 MiB. Verification reads its parameters from the stored hash, which
/// keeps old hashes valid after the cost is changed.
#[derive(Clone)]
pub struct PasswordService {
    params: Params,
}

impl PasswordService {
    pub fn new(cost: u32) -> anyhow::Result<Self> {
        let cost = cost.clamp(MIN_COST, MAX_COST);
        let params = Params::new(1 << (cost + 4), ITERATIONS, 1, None).map_err(|e| {
            error!(error = %e, cost, "argon2 params error");
            anyhow::anyhow!(e.to_string())
        })?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash_password(&self, plain: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, "argon2 hash_password error");
                anyhow::anyhow!(e.to_string())
            })?
            .to_string();
        Ok(hash)
    }

    pub fn verify_password(&self, plain: &str, hash: &str) -> anyhow::Result<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            error!(error = %e, "argon2 parse hash error");
            anyhow::anyhow!(e.to_string())
        })?;
        Ok(Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok())
    }

    /// [`hash_password`](Self::hash_password) on the blocking pool.
    pub async fn hash_password_blocking(&self, plain: String) -> anyhow::Result<String> {
        let svc = self.clone();
        tokio::task::spawn_blocking(move || svc.hash_password(&plain)).await?
    }

    /// [`verify_password`](Self::verify_password) on the blocking pool.
    pub async fn verify_password_blocking(
        &self,
        plain: String,
        hash: String,
    ) -> anyhow::Result<bool> {
        let svc = self.clone();
        tokio::task::spawn_blocking(move || svc.verify_password(&plain, &hash)).await?
    }
}
