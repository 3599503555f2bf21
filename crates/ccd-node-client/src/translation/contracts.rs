//! Contract instances, module sources, trace events and dry runs.

use ccd_types::{
    ContractTraceEvent, ContractVersion, Energy, InstanceInfo, InstanceInfoCommon, InstanceStateEntry,
    InvokeContractResult, VersionedModuleSource,
};

use super::common::{address, required_contract_address};
use super::summary::reject_reason;
use super::{amount, each, hex, require, required_hex, required_ident, FieldPath, TranslationResult};
use crate::domain::TranslationError;
use crate::wire::contracts as wire;
use crate::wire::Bytes;

/// Contract version code.
pub fn contract_version(code: i32, path: impl FieldPath) -> TranslationResult<ContractVersion> {
    match code {
        wire::contract_version::V0 => Ok(ContractVersion::V0),
        wire::contract_version::V1 => Ok(ContractVersion::V1),
        other => Err(TranslationError::unknown_enum_value(path.render(), other)),
    }
}

fn instance_common(
    owner: Option<Bytes>,
    amount_value: Option<u64>,
    methods: Vec<String>,
    name: Option<String>,
    source_module: Option<Bytes>,
    p: &str,
) -> TranslationResult<InstanceInfoCommon> {
    Ok(InstanceInfoCommon {
        amount: amount(amount_value, (p, "amount"))?,
        source_module: required_ident(source_module, (p, "sourceModule"))?,
        owner: required_ident(owner, (p, "owner"))?,
        methods,
        name: require(name, (p, "name"))?,
    })
}

/// Contract instance.
pub fn instance_info(info: wire::InstanceInfo) -> TranslationResult<InstanceInfo> {
    match info {
        wire::InstanceInfo::V0(v0) => Ok(InstanceInfo::V0 {
            model: required_hex(v0.model, "InstanceInfo.v0.model")?,
            common: instance_common(v0.owner, v0.amount, v0.methods, v0.name, v0.source_module, "InstanceInfo.v0")?,
        }),
        wire::InstanceInfo::V1(v1) => Ok(InstanceInfo::V1 {
            common: instance_common(v1.owner, v1.amount, v1.methods, v1.name, v1.source_module, "InstanceInfo.v1")?,
        }),
        wire::InstanceInfo::Unrecognized(_) => Err(TranslationError::unknown_variant("InstanceInfo")),
    }
}

/// Module source with its version.
pub fn module_source(source: wire::VersionedModuleSource) -> TranslationResult<VersionedModuleSource> {
    match source {
        wire::VersionedModuleSource::V0(bytes) => Ok(VersionedModuleSource::V0(hex(bytes))),
        wire::VersionedModuleSource::V1(bytes) => Ok(VersionedModuleSource::V1(hex(bytes))),
        wire::VersionedModuleSource::Unrecognized(_) => {
            Err(TranslationError::unknown_variant("VersionedModuleSource"))
        }
    }
}

/// Entry of the contract state stream.
pub fn instance_state_entry(pair: wire::InstanceStateKvPair) -> InstanceStateEntry {
    InstanceStateEntry {
        key: hex(pair.key),
        value: hex(pair.value),
    }
}

/// One step of a contract execution trace.
pub fn trace_event(element: wire::ContractTraceElement) -> TranslationResult<ContractTraceEvent> {
    match element {
        wire::ContractTraceElement::Updated(updated) => {
            const P: &str = "ContractTraceElement.updated";
            Ok(ContractTraceEvent::Updated {
                contract_version: contract_version(updated.contract_version, (P, "contractVersion"))?,
                address: required_contract_address(updated.address, (P, "address"))?,
                instigator: address(require(updated.instigator, (P, "instigator"))?, (P, "instigator"))?,
                amount: amount(updated.amount, (P, "amount"))?,
                message: required_hex(updated.parameter, (P, "parameter"))?,
                receive_name: require(updated.receive_name, (P, "receiveName"))?,
                events: updated.events.into_iter().map(hex).collect(),
            })
        }
        wire::ContractTraceElement::Transferred(transferred) => {
            const P: &str = "ContractTraceElement.transferred";
            Ok(ContractTraceEvent::Transferred {
                from: required_contract_address(transferred.sender, (P, "sender"))?,
                amount: amount(transferred.amount, (P, "amount"))?,
                to: required_ident(transferred.receiver, (P, "receiver"))?,
            })
        }
        wire::ContractTraceElement::Interrupted(interrupted) => Ok(ContractTraceEvent::Interrupted {
            address: required_contract_address(interrupted.address, "ContractTraceElement.interrupted.address")?,
            events: interrupted.events.into_iter().map(hex).collect(),
        }),
        wire::ContractTraceElement::Resumed(resumed) => Ok(ContractTraceEvent::Resumed {
            address: required_contract_address(resumed.address, "ContractTraceElement.resumed.address")?,
            success: require(resumed.success, "ContractTraceElement.resumed.success")?,
        }),
        wire::ContractTraceElement::Upgraded(upgraded) => {
            const P: &str = "ContractTraceElement.upgraded";
            Ok(ContractTraceEvent::Upgraded {
                address: required_contract_address(upgraded.address, (P, "address"))?,
                from: required_ident(upgraded.from, (P, "from"))?,
                to: required_ident(upgraded.to, (P, "to"))?,
            })
        }
        wire::ContractTraceElement::Unrecognized(_) => {
            Err(TranslationError::unknown_variant("ContractTraceElement"))
        }
    }
}

/// Outcome of a dry run.
pub fn invoke_result(response: wire::InvokeInstanceResponse) -> TranslationResult<InvokeContractResult> {
    match response {
        wire::InvokeInstanceResponse::Success(success) => Ok(InvokeContractResult::Success {
            used_energy: Energy(require(success.used_energy, "InvokeInstanceResponse.success.usedEnergy")?),
            return_value: success.return_value.map(hex),
            events: each(success.effects, trace_event)?,
        }),
        wire::InvokeInstanceResponse::Failure(failure) => Ok(InvokeContractResult::Failure {
            used_energy: Energy(require(failure.used_energy, "InvokeInstanceResponse.failure.usedEnergy")?),
            reason: reject_reason(require(failure.reason, "InvokeInstanceResponse.failure.reason")?)?,
            return_value: failure.return_value.map(hex),
        }),
        wire::InvokeInstanceResponse::Unrecognized(_) => {
            Err(TranslationError::unknown_variant("InvokeInstanceResponse"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TranslationErrorKind;
    use crate::wire::common::ContractAddress as WireContract;
    use crate::wire::summary::RejectReason as WireReason;
    use crate::wire::Empty;
    use ccd_types::{CcdAmount, ContractAddress, RejectReason};
    use serde_json::json;

    fn v1_instance() -> wire::InstanceInfoV1 {
        wire::InstanceInfoV1 {
            owner: Some(Bytes(vec![1; 32])),
            amount: Some(55),
            methods: vec!["counter.inc".to_string()],
            name: Some("init_counter".to_string()),
            source_module: Some(Bytes(vec![2; 32])),
        }
    }

    #[test]
    fn test_instance_v1() {
        let info = instance_info(wire::InstanceInfo::V1(v1_instance())).unwrap();
        assert!(matches!(info, InstanceInfo::V1 { .. }));
        assert_eq!(info.common().amount, CcdAmount::from_micro_ccd(55));
        assert_eq!(info.common().methods, vec!["counter.inc".to_string()]);
    }

    #[test]
    fn test_instance_missing_name() {
        let mut instance = v1_instance();
        instance.name = None;
        let err = instance_info(wire::InstanceInfo::V1(instance)).unwrap_err();
        assert_eq!(err.path, "InstanceInfo.v1.name");
    }

    #[test]
    fn test_v0_instance_requires_model() {
        let instance = wire::InstanceInfoV0 {
            model: None,
            owner: Some(Bytes(vec![1; 32])),
            amount: Some(0),
            methods: vec![],
            name: Some("init_a".to_string()),
            source_module: Some(Bytes(vec![2; 32])),
        };
        let err = instance_info(wire::InstanceInfo::V0(instance)).unwrap_err();
        assert_eq!(err.path, "InstanceInfo.v0.model");
    }

    #[test]
    fn test_invoke_failure_carries_reason() {
        let response = wire::InvokeInstanceResponse::Failure(wire::InvokeFailure {
            return_value: None,
            used_energy: Some(120),
            reason: Some(WireReason::OutOfEnergy(Empty {})),
        });
        assert_eq!(
            invoke_result(response),
            Ok(InvokeContractResult::Failure {
                used_energy: Energy(120),
                reason: RejectReason::OutOfEnergy,
                return_value: None,
            })
        );
    }

    #[test]
    fn test_invoke_success_trace() {
        let response = wire::InvokeInstanceResponse::Success(wire::InvokeSuccess {
            return_value: Some(Bytes(vec![7])),
            used_energy: Some(900),
            effects: vec![wire::ContractTraceElement::Resumed(wire::Resumed {
                address: Some(WireContract { index: 5, subindex: 0 }),
                success: Some(true),
            })],
        });
        let InvokeContractResult::Success { events, return_value, .. } = invoke_result(response).unwrap() else {
            panic!("expected success");
        };
        assert_eq!(return_value.unwrap().as_bytes(), &[7]);
        assert_eq!(
            events,
            vec![ContractTraceEvent::Resumed {
                address: ContractAddress::new(5, 0),
                success: true,
            }]
        );
    }

    #[test]
    fn test_unknown_trace_element() {
        let element: wire::ContractTraceElement =
            serde_json::from_value(json!({ "migrated": {} })).unwrap();
        assert_eq!(trace_event(element).unwrap_err().kind, TranslationErrorKind::UnknownVariant);
    }

    #[test]
    fn test_unknown_contract_version() {
        assert!(contract_version(4, "v").is_err());
    }
}
