//! Discount resolver and admin discount management.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::discount::{validate_code, DiscountCode};
use crate::domain::principal::{require_admin, Principal};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// Length of auto-generated codes, matching the legacy generator.
const GENERATED_CODE_LEN: usize = 10;
/// Retries before giving up on finding an unused random code.
const GENERATION_ATTEMPTS: usize = 10;

/// New discount parameters for the admin endpoints.
#[derive(Debug, Clone, Default)]
pub struct DiscountSpec {
    pub amount: Option<Decimal>,
    pub percentage: Option<Decimal>,
    pub lot_id: Option<i64>,
    pub user_id: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
}

pub struct DiscountService {
    repos: Arc<dyn RepositoryProvider>,
}

impl DiscountService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Apply a discount code to a base cost.
    ///
    /// Scope checks: a lot-scoped code must match the session's lot, a
    /// user-scoped code the paying user. An expired code behaves like an
    /// unknown one. The discounted cost never goes below zero.
    pub async fn apply(
        &self,
        base_cost: Decimal,
        code: &str,
        lot_id: i64,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Decimal> {
        let discount = self
            .repos
            .discounts()
            .find_by_code(code)
            .await?
            .ok_or_else(|| DomainError::not_found("DiscountCode", "code", code))?;

        if discount.is_expired(now) {
            return Err(DomainError::not_found("DiscountCode", "code", code));
        }

        if let Some(scoped_lot) = discount.lot_id {
            if scoped_lot != lot_id {
                return Err(DomainError::Forbidden(
                    "Discount code is not valid for this parking lot".to_string(),
                ));
            }
        }

        if let Some(ref scoped_user) = discount.user_id {
            if scoped_user != user_id {
                return Err(DomainError::Forbidden(
                    "Discount code is not valid for this user".to_string(),
                ));
            }
        }

        let discounted = if let Some(amount) = discount.amount {
            base_cost - amount
        } else if let Some(percentage) = discount.percentage {
            base_cost * (Decimal::ONE - percentage / Decimal::from(100))
        } else {
            base_cost
        };

        Ok(discounted.max(Decimal::ZERO))
    }

    /// Create a discount with an admin-chosen code.
    pub async fn create(
        &self,
        principal: &Principal,
        code: &str,
        spec: DiscountSpec,
    ) -> DomainResult<DiscountCode> {
        require_admin(principal)?;

        if !validate_code(code) {
            return Err(DomainError::Validation(
                "Discount code must contain only letters and be at most 30 characters".to_string(),
            ));
        }

        if self.repos.discounts().find_by_code(code).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Discount code '{code}' already exists"
            )));
        }

        let created = self.repos.discounts().save(new_code(code, spec)).await?;
        info!(code = %created.code, id = created.id, "Discount code created");
        Ok(created)
    }

    /// Create a discount with a random 10-letter code. Retries a bounded
    /// number of times so an unlucky collision streak surfaces as an
    /// error instead of looping.
    pub async fn generate(
        &self,
        principal: &Principal,
        spec: DiscountSpec,
    ) -> DomainResult<DiscountCode> {
        require_admin(principal)?;

        for _ in 0..GENERATION_ATTEMPTS {
            let code = random_code();
            if self.repos.discounts().find_by_code(&code).await?.is_none() {
                let created = self
                    .repos
                    .discounts()
                    .save(new_code(&code, spec.clone()))
                    .await?;
                info!(code = %created.code, id = created.id, "Discount code generated");
                return Ok(created);
            }
        }

        Err(DomainError::Conflict(
            "Could not generate a unique discount code, please retry".to_string(),
        ))
    }

    /// Edit an existing discount; unset fields keep their current value.
    pub async fn edit(
        &self,
        principal: &Principal,
        id: i64,
        spec: DiscountSpec,
        code: Option<String>,
    ) -> DomainResult<DiscountCode> {
        require_admin(principal)?;

        let mut discount = self
            .repos
            .discounts()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("DiscountCode", "id", id))?;

        if let Some(code) = code {
            if !validate_code(&code) {
                return Err(DomainError::Validation(
                    "Discount code must contain only letters and be at most 30 characters"
                        .to_string(),
                ));
            }
            discount.code = code;
        }
        discount.amount = spec.amount.or(discount.amount);
        discount.percentage = spec.percentage.or(discount.percentage);
        discount.lot_id = spec.lot_id.or(discount.lot_id);
        discount.user_id = spec.user_id.or(discount.user_id);
        discount.expiration_date = spec.expiration_date.or(discount.expiration_date);

        self.repos.discounts().update(discount.clone()).await?;
        Ok(discount)
    }

    pub async fn delete(&self, principal: &Principal, id: i64) -> DomainResult<()> {
        require_admin(principal)?;
        self.repos.discounts().delete(id).await
    }

    pub async fn list(&self, principal: &Principal) -> DomainResult<Vec<DiscountCode>> {
        require_admin(principal)?;
        self.repos.discounts().find_all().await
    }
}

fn new_code(code: &str, spec: DiscountSpec) -> DiscountCode {
    DiscountCode {
        id: 0,
        code: code.to_string(),
        amount: spec.amount,
        percentage: spec.percentage,
        lot_id: spec.lot_id,
        user_id: spec.user_id,
        expiration_date: spec.expiration_date,
        created_at: Utc::now(),
    }
}

fn random_code() -> String {
    const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut rng = rand::thread_rng();
    (0..GENERATED_CODE_LEN)
        .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::principal::Role;
    use crate::infrastructure::storage::memory::MemoryRepositoryProvider;
    use chrono::Duration;

    fn admin() -> Principal {
        Principal {
            id: "admin-1".into(),
            username: "admin".into(),
            role: Role::Admin,
            free_parking: false,
        }
    }

    fn service() -> (DiscountService, Arc<dyn RepositoryProvider>) {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(MemoryRepositoryProvider::new());
        (DiscountService::new(repos.clone()), repos)
    }

    #[tokio::test]
    async fn unknown_code_is_not_found() {
        let (svc, _) = service();
        let err = svc
            .apply(Decimal::from(10), "NOPE", 1, "u1", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn flat_amount_is_deducted() {
        let (svc, _) = service();
        svc.create(
            &admin(),
            "FLAT",
            DiscountSpec {
                amount: Some(Decimal::from(3)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let cost = svc
            .apply(Decimal::from(10), "FLAT", 1, "u1", Utc::now())
            .await
            .unwrap();
        assert_eq!(cost, Decimal::from(7));
    }

    #[tokio::test]
    async fn percentage_is_applied() {
        let (svc, _) = service();
        svc.create(
            &admin(),
            "QUARTER",
            DiscountSpec {
                percentage: Some(Decimal::from(25)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let cost = svc
            .apply(Decimal::from(40), "QUARTER", 1, "u1", Utc::now())
            .await
            .unwrap();
        assert_eq!(cost, Decimal::from(30));
    }

    #[tokio::test]
    async fn flat_deduction_clamps_at_zero() {
        let (svc, _) = service();
        svc.create(
            &admin(),
            "HUGE",
            DiscountSpec {
                amount: Some(Decimal::from(100)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let cost = svc
            .apply(Decimal::from(10), "HUGE", 1, "u1", Utc::now())
            .await
            .unwrap();
        assert_eq!(cost, Decimal::ZERO);
    }

    #[tokio::test]
    async fn lot_scope_mismatch_is_forbidden() {
        let (svc, _) = service();
        svc.create(
            &admin(),
            "LOTFIVE",
            DiscountSpec {
                percentage: Some(Decimal::from(50)),
                lot_id: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let err = svc
            .apply(Decimal::from(10), "LOTFIVE", 6, "u1", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        // Matching lot applies normally
        let cost = svc
            .apply(Decimal::from(10), "LOTFIVE", 5, "u1", Utc::now())
            .await
            .unwrap();
        assert_eq!(cost, Decimal::from(5));
    }

    #[tokio::test]
    async fn user_scope_mismatch_is_forbidden() {
        let (svc, _) = service();
        svc.create(
            &admin(),
            "PERSONAL",
            DiscountSpec {
                percentage: Some(Decimal::from(50)),
                user_id: Some("owner".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let err = svc
            .apply(Decimal::from(10), "PERSONAL", 1, "intruder", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn expired_code_behaves_like_unknown() {
        let (svc, _) = service();
        svc.create(
            &admin(),
            "OLD",
            DiscountSpec {
                percentage: Some(Decimal::from(50)),
                expiration_date: Some(Utc::now() - Duration::days(1)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let err = svc
            .apply(Decimal::from(10), "OLD", 1, "u1", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn create_rejects_invalid_code_and_duplicates() {
        let (svc, _) = service();
        let err = svc
            .create(&admin(), "BAD-CODE", DiscountSpec::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        svc.create(&admin(), "TWICE", DiscountSpec::default())
            .await
            .unwrap();
        let err = svc
            .create(&admin(), "TWICE", DiscountSpec::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn create_requires_admin() {
        let (svc, _) = service();
        let user = Principal {
            id: "u1".into(),
            username: "bob".into(),
            role: Role::User,
            free_parking: false,
        };
        let err = svc
            .create(&user, "NOPE", DiscountSpec::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn generate_produces_letters_only_code() {
        let (svc, _) = service();
        let created = svc.generate(&admin(), DiscountSpec::default()).await.unwrap();
        assert_eq!(created.code.len(), GENERATED_CODE_LEN);
        assert!(created.code.chars().all(|c| c.is_ascii_alphabetic()));
    }
}
