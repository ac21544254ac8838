//! 비밀번호 해싱
//!
//! bcrypt는 CPU를 많이 사용하므로 blocking 스레드 풀에서 실행합니다.

use crate::utils::error::AppError;

/// 비밀번호를 bcrypt로 해싱합니다.
pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::InternalError(format!("Hash task failed: {}", e)))?
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))
}

/// 평문 비밀번호와 저장된 해시를 비교합니다.
///
/// 해시 형식이 잘못된 경우도 불일치로 처리합니다.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .map_err(|e| AppError::InternalError(format!("Verify task failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn hashed_password_should_verify() {
        let hash = hash_password("s3cret!".to_string(), TEST_COST).await.unwrap();

        assert_ne!(hash, "s3cret!");
        assert!(verify_password("s3cret!".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password("wrong".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn malformed_hash_should_not_verify() {
        let result = verify_password("pw".to_string(), "not-a-hash".to_string())
            .await
            .unwrap();
        assert!(!result);
    }
}
