//! Shapes shared by several messages: addresses, commissions, pools and
//! stake changes.

use ccd_types::{
    Address, BakerPoolInfo, CommissionRanges, CommissionRates, ContractAddress, DelegationTarget,
    ExchangeRate, InclusiveRange, OpenStatus, StakePendingChange,
};

use super::{amount, fraction, ident, require, timestamp, timestamp_from_millis, FieldPath, TranslationResult};
use crate::domain::TranslationError;
use crate::wire::common as wire;

/// Contract address.
pub fn contract_address(address: wire::ContractAddress) -> ContractAddress {
    ContractAddress::new(address.index, address.subindex)
}

/// Required contract address.
pub fn required_contract_address(
    address: Option<wire::ContractAddress>,
    path: impl FieldPath,
) -> TranslationResult<ContractAddress> {
    require(address, path).map(contract_address)
}

/// Account or contract address.
pub fn address(address: wire::Address, path: impl FieldPath) -> TranslationResult<Address> {
    match address {
        wire::Address::Account(bytes) => ident(&bytes, path).map(Address::Account),
        wire::Address::Contract(contract) => Ok(Address::Contract(contract_address(contract))),
        wire::Address::Unrecognized(_) => Err(TranslationError::unknown_variant(path.render())),
    }
}

/// Exchange rate kept as a ratio.
pub fn exchange_rate(rate: Option<wire::ExchangeRate>, path: impl FieldPath) -> TranslationResult<ExchangeRate> {
    let rate = require(rate, path)?;
    Ok(ExchangeRate {
        numerator: rate.numerator,
        denominator: rate.denominator,
    })
}

/// Exchange rate collapsed to a factor.
pub fn ratio(rate: Option<wire::ExchangeRate>, path: impl FieldPath) -> TranslationResult<f64> {
    let rate = require(rate, path)?;
    if rate.denominator == 0 {
        return Err(TranslationError::malformed(path.render(), "zero denominator"));
    }
    Ok(rate.numerator as f64 / rate.denominator as f64)
}

/// Commission rates of a pool.
pub fn commission_rates(
    rates: Option<wire::CommissionRates>,
    path: &str,
) -> TranslationResult<CommissionRates> {
    let rates = require(rates, path)?;
    Ok(CommissionRates {
        transaction_commission: fraction(rates.transaction, (path, "transaction"))?,
        baking_commission: fraction(rates.baking, (path, "baking"))?,
        finalization_commission: fraction(rates.finalization, (path, "finalization"))?,
    })
}

fn range(
    range: Option<wire::InclusiveRangeAmountFraction>,
    path: (&str, &str),
) -> TranslationResult<InclusiveRange<f64>> {
    let range = require(range, path)?;
    Ok(InclusiveRange {
        min: fraction(range.min, path)?,
        max: fraction(range.max, path)?,
    })
}

/// Allowed commission ranges.
pub fn commission_ranges(
    ranges: Option<wire::CommissionRanges>,
    path: &str,
) -> TranslationResult<CommissionRanges> {
    let ranges = require(ranges, path)?;
    Ok(CommissionRanges {
        transaction_commission: range(ranges.transaction, (path, "transaction"))?,
        baking_commission: range(ranges.baking, (path, "baking"))?,
        finalization_commission: range(ranges.finalization, (path, "finalization"))?,
    })
}

/// Pool open status code.
pub fn open_status(code: i32, path: impl FieldPath) -> TranslationResult<OpenStatus> {
    match code {
        wire::open_status::OPEN_FOR_ALL => Ok(OpenStatus::OpenForAll),
        wire::open_status::CLOSED_FOR_NEW => Ok(OpenStatus::ClosedForNew),
        wire::open_status::CLOSED_FOR_ALL => Ok(OpenStatus::ClosedForAll),
        other => Err(TranslationError::unknown_enum_value(path.render(), other)),
    }
}

/// Pool configuration.
pub fn baker_pool_info(info: wire::BakerPoolInfo, path: &str) -> TranslationResult<BakerPoolInfo> {
    Ok(BakerPoolInfo {
        open_status: open_status(info.open_status, (path, "openStatus"))?,
        metadata_url: info.url,
        commission_rates: commission_rates(info.commission_rates, &format!("{path}.commissionRates"))?,
    })
}

/// Delegation target.
pub fn delegation_target(
    target: Option<wire::DelegationTarget>,
    path: impl FieldPath,
) -> TranslationResult<DelegationTarget> {
    match require(target, path)? {
        wire::DelegationTarget::Passive(_) => Ok(DelegationTarget::Passive),
        wire::DelegationTarget::Baker(id) => Ok(DelegationTarget::Baker(id)),
        wire::DelegationTarget::Unrecognized(_) => Err(TranslationError::unknown_variant(path.render())),
    }
}

/// Pending stake change. Absent means none.
pub fn stake_pending_change(
    change: Option<wire::StakePendingChange>,
    path: &str,
) -> TranslationResult<Option<StakePendingChange>> {
    let Some(change) = change else {
        return Ok(None);
    };
    let change = match change {
        wire::StakePendingChange::Reduce(reduce) => StakePendingChange::Reduce {
            new_stake: amount(reduce.new_stake, (path, "reduce.newStake"))?,
            effective_time: timestamp(reduce.effective_time, (path, "reduce.effectiveTime"))?,
        },
        wire::StakePendingChange::Remove(millis) => StakePendingChange::Remove {
            effective_time: timestamp_from_millis(millis, (path, "remove"))?,
        },
        wire::StakePendingChange::Unrecognized(_) => {
            return Err(TranslationError::unknown_variant(path));
        }
    };
    Ok(Some(change))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TranslationErrorKind;
    use crate::wire::common::AmountFraction;
    use crate::wire::Empty;

    fn frac(ppht: u32) -> Option<AmountFraction> {
        Some(AmountFraction {
            parts_per_hundred_thousand: ppht,
        })
    }

    #[test]
    fn test_commission_rates_normalised() {
        let rates = commission_rates(
            Some(wire::CommissionRates {
                finalization: frac(100_000),
                baking: frac(10_000),
                transaction: frac(5_000),
            }),
            "PoolInfo.commissionRates",
        )
        .unwrap();
        assert_eq!(rates.finalization_commission, 1.0);
        assert_eq!(rates.baking_commission, 0.1);
        assert_eq!(rates.transaction_commission, 0.05);
    }

    #[test]
    fn test_missing_commission_names_field() {
        let err = commission_rates(
            Some(wire::CommissionRates {
                finalization: frac(1),
                baking: None,
                transaction: frac(1),
            }),
            "PoolInfo.commissionRates",
        )
        .unwrap_err();
        assert_eq!(err.path, "PoolInfo.commissionRates.baking");
    }

    #[test]
    fn test_unknown_open_status() {
        let err = open_status(7, "BakerPoolInfo.openStatus").unwrap_err();
        assert_eq!(err.kind, TranslationErrorKind::UnknownEnumValue(7));
    }

    #[test]
    fn test_delegation_target_cases() {
        assert_eq!(
            delegation_target(Some(wire::DelegationTarget::Passive(Empty {})), "t"),
            Ok(DelegationTarget::Passive)
        );
        assert_eq!(
            delegation_target(Some(wire::DelegationTarget::Baker(4)), "t"),
            Ok(DelegationTarget::Baker(4))
        );
        let unknown = wire::DelegationTarget::Unrecognized(serde_json::json!({ "future": {} }));
        assert_eq!(
            delegation_target(Some(unknown), "t").unwrap_err().kind,
            TranslationErrorKind::UnknownVariant
        );
    }

    #[test]
    fn test_zero_denominator_ratio() {
        let rate = wire::ExchangeRate {
            numerator: 1,
            denominator: 0,
        };
        assert!(ratio(Some(rate), "r").is_err());
    }

    #[test]
    fn test_absent_pending_change() {
        assert_eq!(stake_pending_change(None, "p"), Ok(None));
    }
}
