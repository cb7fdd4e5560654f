use crate::core::errors::LedgerError;

pub fn hash_password(password: &str, cost: u32) -> Result<String, LedgerError> {
    bcrypt::hash(password, cost).map_err(|e| LedgerError::InternalServerError(format!("Password hashing error: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, LedgerError> {
    bcrypt::verify(password, hash)
        .map_err(|e| LedgerError::InternalServerError(format!("Password verification error: {}", e)))
}
