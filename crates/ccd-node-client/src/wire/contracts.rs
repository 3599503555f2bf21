//! Contract messages.

use serde::{Deserialize, Serialize};

use super::common::{Address, ContractAddress};
use super::summary::RejectReason;
use super::Bytes;

/// Contract version codes.
pub mod contract_version {
    /// Version 0.
    pub const V0: i32 = 0;
    /// Version 1.
    pub const V1: i32 = 1;
}

/// Contract update within a trace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct InstanceUpdatedEvent {
    pub contract_version: i32,
    pub address: Option<ContractAddress>,
    pub instigator: Option<Address>,
    pub amount: Option<u64>,
    pub parameter: Option<Bytes>,
    pub receive_name: Option<String>,
    pub events: Vec<Bytes>,
}

/// Transfer from a contract to an account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Transferred {
    pub sender: Option<ContractAddress>,
    pub amount: Option<u64>,
    pub receiver: Option<Bytes>,
}

/// Contract execution interrupted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Interrupted {
    pub address: Option<ContractAddress>,
    pub events: Vec<Bytes>,
}

/// Contract execution resumed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Resumed {
    pub address: Option<ContractAddress>,
    pub success: Option<bool>,
}

/// Contract module upgraded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Upgraded {
    pub address: Option<ContractAddress>,
    pub from: Option<Bytes>,
    pub to: Option<Bytes>,
}

/// One step of a contract execution trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum ContractTraceElement {
    Updated(InstanceUpdatedEvent),
    Transferred(Transferred),
    Interrupted(Interrupted),
    Resumed(Resumed),
    Upgraded(Upgraded),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Successful dry run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct InvokeSuccess {
    pub return_value: Option<Bytes>,
    pub used_energy: Option<u64>,
    pub effects: Vec<ContractTraceElement>,
}

/// Failed dry run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct InvokeFailure {
    pub return_value: Option<Bytes>,
    pub used_energy: Option<u64>,
    pub reason: Option<RejectReason>,
}

/// Dry run outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum InvokeInstanceResponse {
    Success(InvokeSuccess),
    Failure(InvokeFailure),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Instance fields common to both versions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct InstanceInfoV1 {
    pub owner: Option<Bytes>,
    pub amount: Option<u64>,
    pub methods: Vec<String>,
    pub name: Option<String>,
    pub source_module: Option<Bytes>,
}

/// Version 0 instance, which also carries its state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct InstanceInfoV0 {
    pub model: Option<Bytes>,
    pub owner: Option<Bytes>,
    pub amount: Option<u64>,
    pub methods: Vec<String>,
    pub name: Option<String>,
    pub source_module: Option<Bytes>,
}

/// Instance by version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum InstanceInfo {
    V0(InstanceInfoV0),
    V1(InstanceInfoV1),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Module source by version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum VersionedModuleSource {
    V0(Bytes),
    V1(Bytes),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Key and value in contract state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct InstanceStateKvPair {
    pub key: Bytes,
    pub value: Bytes,
}
