use rust_decimal::{Decimal, RoundingStrategy};

use super::entity::discount_policy::{self, DiscountType};

/// 예약에 적용된 할인
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedDiscount {
    pub policy_name: String,
    pub amount: Decimal,
}

/// 단일 정책의 할인 금액을 계산합니다.
///
/// 최소 숙박일 미달이거나 값이 비어 있으면 0을 반환합니다.
pub fn discount_amount(policy: &discount_policy::Model, subtotal: Decimal, nights: i64) -> Decimal {
    if nights < i64::from(policy.min_days) {
        return Decimal::ZERO;
    }

    match policy.discount_type {
        DiscountType::Percentage => policy
            .discount_rate
            .map(|rate| {
                (subtotal * rate / Decimal::ONE_HUNDRED)
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            })
            .unwrap_or(Decimal::ZERO),
        DiscountType::FixedAmount => policy
            .discount_amount
            .map(|amount| amount * Decimal::from(nights))
            .unwrap_or(Decimal::ZERO),
    }
}

/// 적용 가능한 정책 중 할인 금액이 가장 큰 정책을 선택합니다.
///
/// 금액이 같으면 먼저 나온 정책이 유지됩니다.
pub fn best_discount(
    policies: &[discount_policy::Model],
    subtotal: Decimal,
    nights: i64,
) -> Option<AppliedDiscount> {
    let mut best: Option<AppliedDiscount> = None;

    for policy in policies {
        let amount = discount_amount(policy, subtotal, nights);
        if amount <= Decimal::ZERO {
            continue;
        }

        let is_better = best.as_ref().map_or(true, |current| amount > current.amount);
        if is_better {
            best = Some(AppliedDiscount {
                policy_name: policy.name.clone(),
                amount,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn d(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn policy(
        name: &str,
        min_days: i32,
        discount_type: DiscountType,
        rate: Option<Decimal>,
        amount: Option<Decimal>,
    ) -> discount_policy::Model {
        discount_policy::Model {
            id: 1,
            hotel_id: 1,
            name: name.to_string(),
            min_days,
            discount_type,
            discount_rate: rate,
            discount_amount: amount,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn percentage_discount_should_apply_rate_to_subtotal() {
        let p = policy("장기 10%", 3, DiscountType::Percentage, Some(d("10")), None);

        assert_eq!(discount_amount(&p, d("500"), 5), d("50"));
    }

    #[test]
    fn fixed_discount_should_multiply_by_nights() {
        let p = policy("1박 10달러", 2, DiscountType::FixedAmount, None, Some(d("10")));

        assert_eq!(discount_amount(&p, d("400"), 4), d("40"));
    }

    #[test]
    fn policy_below_min_days_should_not_apply() {
        let p = policy("7박 이상", 7, DiscountType::Percentage, Some(d("20")), None);

        assert_eq!(discount_amount(&p, d("300"), 3), Decimal::ZERO);
        assert!(best_discount(&[p], d("300"), 3).is_none());
    }

    #[test]
    fn best_discount_should_pick_largest_amount() {
        let policies = vec![
            policy("5%", 1, DiscountType::Percentage, Some(d("5")), None),
            policy("10%", 1, DiscountType::Percentage, Some(d("10")), None),
            policy("1박 3", 1, DiscountType::FixedAmount, None, Some(d("3"))),
        ];

        let best = best_discount(&policies, d("400"), 4).unwrap();

        assert_eq!(best.policy_name, "10%");
        assert_eq!(best.amount, d("40"));
    }

    #[test]
    fn tie_should_keep_first_policy() {
        let policies = vec![
            policy("first", 1, DiscountType::Percentage, Some(d("10")), None),
            policy("second", 1, DiscountType::FixedAmount, None, Some(d("10"))),
        ];

        let best = best_discount(&policies, d("200"), 2).unwrap();

        assert_eq!(best.policy_name, "first");
    }

    #[test]
    fn percentage_should_round_to_cents() {
        let p = policy("3.33%", 0, DiscountType::Percentage, Some(d("3.33")), None);

        assert_eq!(discount_amount(&p, d("99.99"), 1), d("3.33"));
    }
}
