//! Accounts, credentials and account-level queries.

use std::collections::BTreeMap;

use ccd_types::{
    derive_available_balance, AccountBakerDetails, AccountCredential, AccountDelegationDetails,
    AccountEncryptedAmount, AccountInfo, AccountInfoCommon, AccountReleaseSchedule, CcdAmount,
    Cooldown, CooldownStatus, CredentialPublicKeys, CryptographicParameters, HexBytes,
    NextAccountNonce, Policy, Release,
};
use chrono::NaiveDate;

use super::common::{baker_pool_info, delegation_target, stake_pending_change};
use super::{
    amount, each, hex, idents, require, required_hex, required_ident, timestamp, FieldPath,
    TranslationResult,
};
use crate::domain::TranslationError;
use crate::wire::account as wire;

/// Account state at a block.
///
/// A staking record of a shape this library does not know yields
/// [`AccountInfo::Unknown`] rather than an error, so that plain account data
/// stays readable across protocol upgrades.
pub fn account_info(info: wire::AccountInfo) -> TranslationResult<AccountInfo> {
    let balance = amount(info.amount, "AccountInfo.amount")?;
    let release_schedule = release_schedule(require(info.schedule, "AccountInfo.schedule")?)?;
    let credentials = info
        .creds
        .into_iter()
        .map(|(index, credential)| Ok((index, account_credential(credential)?)))
        .collect::<TranslationResult<BTreeMap<_, _>>>()?;

    let staking = match info.stake {
        None => Staking::None,
        Some(wire::StakingInfo::Baker(baker)) => Staking::Baker(baker_details(baker)?),
        Some(wire::StakingInfo::Delegator(delegator)) => Staking::Delegator(delegation_details(delegator)?),
        Some(wire::StakingInfo::Unrecognized(_)) => Staking::Unknown,
    };
    let staked = match &staking {
        Staking::Baker(baker) => Some(baker.staked_amount),
        Staking::Delegator(delegation) => Some(delegation.staked_amount),
        Staking::None | Staking::Unknown => None,
    };
    let available_balance = match info.available_balance {
        Some(available) => CcdAmount::from_micro_ccd(available),
        None => derive_available_balance(balance, staked, release_schedule.total),
    };

    let common = AccountInfoCommon {
        address: required_ident(info.address, "AccountInfo.address")?,
        nonce: require(info.sequence_number, "AccountInfo.sequenceNumber")?,
        amount: balance,
        index: require(info.index, "AccountInfo.index")?,
        threshold: require(info.threshold, "AccountInfo.threshold")?,
        encryption_key: required_hex(info.encryption_key, "AccountInfo.encryptionKey")?,
        encrypted_amount: encrypted_amount(require(info.encrypted_balance, "AccountInfo.encryptedBalance")?)?,
        release_schedule,
        credentials,
        cooldowns: each(info.cooldowns, cooldown)?,
        available_balance,
    };

    Ok(match staking {
        Staking::None => AccountInfo::Simple(common),
        Staking::Baker(baker) => AccountInfo::Baker { common, baker },
        Staking::Delegator(delegation) => AccountInfo::Delegator { common, delegation },
        Staking::Unknown => AccountInfo::Unknown(common),
    })
}

enum Staking {
    None,
    Baker(AccountBakerDetails),
    Delegator(AccountDelegationDetails),
    Unknown,
}

fn baker_details(baker: wire::BakerStakingInfo) -> TranslationResult<AccountBakerDetails> {
    let keys = require(baker.baker_info, "AccountInfo.stake.baker.bakerInfo")?;
    Ok(AccountBakerDetails {
        baker_id: require(keys.baker_id, "AccountInfo.stake.baker.bakerInfo.bakerId")?,
        restake_earnings: baker.restake_earnings,
        staked_amount: amount(baker.staked_amount, "AccountInfo.stake.baker.stakedAmount")?,
        election_verify_key: required_hex(keys.election_key, "AccountInfo.stake.baker.bakerInfo.electionKey")?,
        signature_verify_key: required_hex(keys.signature_key, "AccountInfo.stake.baker.bakerInfo.signatureKey")?,
        aggregation_verify_key: required_hex(
            keys.aggregation_key,
            "AccountInfo.stake.baker.bakerInfo.aggregationKey",
        )?,
        pending_change: stake_pending_change(baker.pending_change, "AccountInfo.stake.baker.pendingChange")?,
        pool_info: baker
            .pool_info
            .map(|pool| baker_pool_info(pool, "AccountInfo.stake.baker.poolInfo"))
            .transpose()?,
        is_suspended: baker.is_suspended,
    })
}

fn delegation_details(delegator: wire::DelegatorStakingInfo) -> TranslationResult<AccountDelegationDetails> {
    Ok(AccountDelegationDetails {
        restake_earnings: delegator.restake_earnings,
        staked_amount: amount(delegator.staked_amount, "AccountInfo.stake.delegator.stakedAmount")?,
        target: delegation_target(delegator.target, "AccountInfo.stake.delegator.target")?,
        pending_change: stake_pending_change(
            delegator.pending_change,
            "AccountInfo.stake.delegator.pendingChange",
        )?,
    })
}

fn encrypted_amount(balance: wire::EncryptedBalance) -> TranslationResult<AccountEncryptedAmount> {
    Ok(AccountEncryptedAmount {
        self_amount: required_hex(balance.self_amount, "AccountInfo.encryptedBalance.selfAmount")?,
        start_index: balance.start_index,
        incoming_amounts: balance.incoming_amounts.into_iter().map(hex).collect(),
        aggregated_amount: balance.aggregated_amount.map(hex),
        num_aggregated: balance.num_aggregated,
    })
}

fn release_schedule(schedule: wire::ReleaseSchedule) -> TranslationResult<AccountReleaseSchedule> {
    Ok(AccountReleaseSchedule {
        total: amount(schedule.total, "AccountInfo.schedule.total")?,
        schedule: each(schedule.schedules, |release| {
            Ok(Release {
                timestamp: timestamp(release.timestamp, "AccountInfo.schedule.schedules.timestamp")?,
                amount: amount(release.amount, "AccountInfo.schedule.schedules.amount")?,
                transactions: idents(release.transactions, "AccountInfo.schedule.schedules.transactions")?,
            })
        })?,
    })
}

fn cooldown(cooldown: wire::Cooldown) -> TranslationResult<Cooldown> {
    let status = match cooldown.status {
        wire::cooldown_status::COOLDOWN => CooldownStatus::Cooldown,
        wire::cooldown_status::PRE_COOLDOWN => CooldownStatus::PreCooldown,
        wire::cooldown_status::PRE_PRE_COOLDOWN => CooldownStatus::PrePreCooldown,
        other => return Err(TranslationError::unknown_enum_value("AccountInfo.cooldowns.status", other)),
    };
    Ok(Cooldown {
        end_time: timestamp(cooldown.end_time, "AccountInfo.cooldowns.endTime")?,
        amount: amount(cooldown.amount, "AccountInfo.cooldowns.amount")?,
        status,
    })
}

fn year_month(value: Option<wire::YearMonth>, path: impl FieldPath) -> TranslationResult<NaiveDate> {
    let value = require(value, path)?;
    i32::try_from(value.year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, value.month, 1))
        .ok_or_else(|| {
            TranslationError::malformed(path.render(), format!("invalid year-month {}-{}", value.year, value.month))
        })
}

fn policy(policy: Option<wire::Policy>, path: &str) -> TranslationResult<Policy> {
    let policy = require(policy, path)?;
    Ok(Policy {
        created_at: year_month(policy.created_at, (path, "createdAt"))?,
        valid_to: year_month(policy.valid_to, (path, "validTo"))?,
        revealed_attributes: policy
            .attributes
            .into_iter()
            .map(|(tag, value)| (tag, hex(value)))
            .collect(),
    })
}

fn credential_keys(keys: Option<wire::CredentialPublicKeys>, path: &str) -> TranslationResult<CredentialPublicKeys> {
    let keys = require(keys, path)?;
    let verify_keys = keys
        .keys
        .into_iter()
        .map(|(index, key)| match key {
            wire::AccountVerifyKey::Ed25519Key(bytes) => Ok((index, hex(bytes))),
            wire::AccountVerifyKey::Unrecognized(_) => {
                Err(TranslationError::unknown_variant(format!("{path}.keys")))
            }
        })
        .collect::<TranslationResult<BTreeMap<u32, HexBytes>>>()?;
    Ok(CredentialPublicKeys {
        keys: verify_keys,
        threshold: require(keys.threshold, (path, "threshold"))?,
    })
}

fn account_credential(credential: wire::AccountCredential) -> TranslationResult<AccountCredential> {
    const PATH: &str = "AccountInfo.creds.credentialValues";
    match require(credential.credential_values, PATH)? {
        wire::CredentialValues::Initial(initial) => Ok(AccountCredential::Initial {
            ip_identity: require(initial.ip_id, "AccountInfo.creds.initial.ipId")?,
            cred_id: required_ident(initial.cred_id, "AccountInfo.creds.initial.credId")?,
            keys: credential_keys(initial.keys, "AccountInfo.creds.initial.keys")?,
            policy: policy(initial.policy, "AccountInfo.creds.initial.policy")?,
        }),
        wire::CredentialValues::Normal(normal) => Ok(AccountCredential::Normal {
            ip_identity: require(normal.ip_id, "AccountInfo.creds.normal.ipId")?,
            cred_id: required_ident(normal.cred_id, "AccountInfo.creds.normal.credId")?,
            keys: credential_keys(normal.keys, "AccountInfo.creds.normal.keys")?,
            policy: policy(normal.policy, "AccountInfo.creds.normal.policy")?,
            ar_threshold: require(normal.ar_threshold, "AccountInfo.creds.normal.arThreshold")?,
            ar_data: normal
                .ar_data
                .into_iter()
                .map(|(ar, data)| (ar, hex(data.enc_id_cred_pub_share)))
                .collect(),
        }),
        wire::CredentialValues::Unrecognized(_) => Err(TranslationError::unknown_variant(PATH)),
    }
}

/// Next nonce of an account.
pub fn next_account_nonce(next: wire::NextAccountSequenceNumber) -> TranslationResult<NextAccountNonce> {
    Ok(NextAccountNonce {
        nonce: require(next.sequence_number, "NextAccountSequenceNumber.sequenceNumber")?,
        all_final: next.all_final,
    })
}

/// Global cryptographic parameters.
pub fn cryptographic_parameters(params: wire::CryptographicParameters) -> CryptographicParameters {
    CryptographicParameters {
        genesis_string: params.genesis_string,
        bulletproof_generators: hex(params.bulletproof_generators),
        on_chain_commitment_key: hex(params.on_chain_commitment_key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TranslationErrorKind;
    use crate::wire::common::{BakerPoolInfo, CommissionRates, DelegationTarget, StakePendingChange};
    use crate::wire::{Bytes, Empty};
    use ccd_types::{AccountAddress, StakePendingChange as DomainPendingChange};
    use serde_json::json;

    fn plain_account() -> wire::AccountInfo {
        wire::AccountInfo {
            sequence_number: Some(4),
            amount: Some(1_000),
            schedule: Some(wire::ReleaseSchedule {
                total: Some(300),
                schedules: vec![],
            }),
            threshold: Some(1),
            encrypted_balance: Some(wire::EncryptedBalance {
                self_amount: Some(Bytes(vec![0; 4])),
                ..Default::default()
            }),
            encryption_key: Some(Bytes(vec![9; 4])),
            index: Some(12),
            address: Some(Bytes(vec![5; 32])),
            ..Default::default()
        }
    }

    #[test]
    fn test_simple_account_derives_available_balance() {
        let info = account_info(plain_account()).unwrap();
        let AccountInfo::Simple(common) = info else {
            panic!("expected simple account");
        };
        assert_eq!(common.address, AccountAddress::new([5; 32]));
        assert_eq!(common.nonce, 4);
        assert_eq!(common.available_balance, CcdAmount::from_micro_ccd(700));
    }

    #[test]
    fn test_node_reported_available_balance_wins() {
        let mut wire_info = plain_account();
        wire_info.available_balance = Some(10);
        let info = account_info(wire_info).unwrap();
        assert_eq!(info.common().available_balance, CcdAmount::from_micro_ccd(10));
    }

    #[test]
    fn test_delegator_account() {
        let mut wire_info = plain_account();
        wire_info.stake = Some(wire::StakingInfo::Delegator(wire::DelegatorStakingInfo {
            staked_amount: Some(900),
            restake_earnings: true,
            target: Some(DelegationTarget::Passive(Empty {})),
            pending_change: Some(StakePendingChange::Remove(1_000)),
        }));
        let info = account_info(wire_info).unwrap();
        let AccountInfo::Delegator { common, delegation } = info else {
            panic!("expected delegator");
        };
        assert_eq!(common.available_balance, CcdAmount::from_micro_ccd(100));
        assert!(matches!(
            delegation.pending_change,
            Some(DomainPendingChange::Remove { .. })
        ));
    }

    #[test]
    fn test_baker_account() {
        let mut wire_info = plain_account();
        wire_info.stake = Some(wire::StakingInfo::Baker(wire::BakerStakingInfo {
            staked_amount: Some(500),
            restake_earnings: false,
            baker_info: Some(wire::BakerInfo {
                baker_id: Some(12),
                election_key: Some(Bytes(vec![1])),
                signature_key: Some(Bytes(vec![2])),
                aggregation_key: Some(Bytes(vec![3])),
            }),
            pending_change: None,
            pool_info: Some(BakerPoolInfo {
                open_status: 1,
                url: "https://pool".to_string(),
                commission_rates: Some(CommissionRates::default()),
            }),
            is_suspended: true,
        }));
        // Commission rates with no fractions are incomplete.
        let err = account_info(wire_info).unwrap_err();
        assert_eq!(err.path, "AccountInfo.stake.baker.poolInfo.commissionRates.transaction");
    }

    #[test]
    fn test_unknown_staking_shape_is_unknown_account() {
        let mut wire_info = plain_account();
        wire_info.stake = Some(wire::StakingInfo::Unrecognized(json!({ "validatorV2": {} })));
        let info = account_info(wire_info).unwrap();
        assert!(matches!(info, AccountInfo::Unknown(_)));
        assert_eq!(info.staked_amount(), None);
    }

    #[test]
    fn test_missing_address_is_reported() {
        let mut wire_info = plain_account();
        wire_info.address = None;
        let err = account_info(wire_info).unwrap_err();
        assert_eq!(err.path, "AccountInfo.address");
        assert_eq!(err.kind, TranslationErrorKind::MissingField);
    }

    #[test]
    fn test_unknown_cooldown_status() {
        let mut wire_info = plain_account();
        wire_info.cooldowns.push(wire::Cooldown {
            end_time: Some(0),
            amount: Some(1),
            status: 9,
        });
        let err = account_info(wire_info).unwrap_err();
        assert_eq!(err.kind, TranslationErrorKind::UnknownEnumValue(9));
    }

    #[test]
    fn test_policy_year_month() {
        let date = year_month(Some(wire::YearMonth { year: 2024, month: 2 }), "p").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert!(year_month(Some(wire::YearMonth { year: 2024, month: 13 }), "p").is_err());
    }

    #[test]
    fn test_initial_credential() {
        let credential = wire::AccountCredential {
            credential_values: Some(wire::CredentialValues::Initial(wire::InitialCredentialValues {
                keys: Some(wire::CredentialPublicKeys {
                    keys: [(0, wire::AccountVerifyKey::Ed25519Key(Bytes(vec![7; 32])))].into(),
                    threshold: Some(1),
                }),
                cred_id: Some(Bytes(vec![1; 48])),
                ip_id: Some(0),
                policy: Some(wire::Policy {
                    created_at: Some(wire::YearMonth { year: 2023, month: 1 }),
                    valid_to: Some(wire::YearMonth { year: 2025, month: 1 }),
                    attributes: BTreeMap::new(),
                }),
            })),
        };
        let translated = account_credential(credential).unwrap();
        assert!(matches!(translated, AccountCredential::Initial { ip_identity: 0, .. }));
    }
}
