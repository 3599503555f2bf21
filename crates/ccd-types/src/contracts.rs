//! # Smart Contracts
//!
//! Instances, modules, invocation results and contract trace events.

use serde::{Deserialize, Serialize};

use crate::identifiers::{AccountAddress, Address, ContractAddress, HexBytes, ModuleReference};
use crate::primitives::{CcdAmount, Energy};
use crate::reject_reason::RejectReason;

/// Smart contract runtime version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractVersion {
    /// Version 0.
    V0,
    /// Version 1.
    V1,
}

/// Fields shared by both instance versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceInfoCommon {
    /// Balance of the instance.
    pub amount: CcdAmount,
    /// Module the instance was created from.
    pub source_module: ModuleReference,
    /// Account that created the instance.
    pub owner: AccountAddress,
    /// Receive entrypoints.
    pub methods: Vec<String>,
    /// Init function name.
    pub name: String,
}

/// Contract instance, tagged by runtime version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstanceInfo {
    /// V0 instance, state stored inline.
    V0 {
        /// Shared part.
        common: InstanceInfoCommon,
        /// Serialized state.
        model: HexBytes,
    },
    /// V1 instance, state stored as a key-value tree.
    V1 {
        /// Shared part.
        common: InstanceInfoCommon,
    },
}

impl InstanceInfo {
    /// Fields shared by both versions.
    pub fn common(&self) -> &InstanceInfoCommon {
        match self {
            Self::V0 { common, .. } | Self::V1 { common } => common,
        }
    }
}

/// Entry of a V1 instance state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceStateEntry {
    /// Key.
    pub key: HexBytes,
    /// Value.
    pub value: HexBytes,
}

/// Module source, tagged by runtime version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersionedModuleSource {
    /// V0 Wasm module.
    V0(HexBytes),
    /// V1 Wasm module.
    V1(HexBytes),
}

/// Step in the execution trace of a contract update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractTraceEvent {
    /// An instance was updated.
    Updated {
        /// Runtime version.
        contract_version: ContractVersion,
        /// Instance.
        address: ContractAddress,
        /// Caller.
        instigator: Address,
        /// Amount sent.
        amount: CcdAmount,
        /// Parameter.
        message: HexBytes,
        /// Entrypoint, `contract.method`.
        receive_name: String,
        /// Logged events.
        events: Vec<HexBytes>,
    },
    /// A contract sent CCD to an account.
    Transferred {
        /// Sending contract.
        from: ContractAddress,
        /// Amount.
        amount: CcdAmount,
        /// Receiving account.
        to: AccountAddress,
    },
    /// Execution paused for an inter-contract call.
    Interrupted {
        /// Instance.
        address: ContractAddress,
        /// Events logged before interruption.
        events: Vec<HexBytes>,
    },
    /// Execution resumed.
    Resumed {
        /// Instance.
        address: ContractAddress,
        /// Whether the call succeeded.
        success: bool,
    },
    /// An instance was upgraded to a new module.
    Upgraded {
        /// Instance.
        address: ContractAddress,
        /// Previous module.
        from: ModuleReference,
        /// New module.
        to: ModuleReference,
    },
}

/// Input of a contract invocation (dry run against a block's state).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractContext {
    /// Caller, the zero account if absent.
    pub invoker: Option<Address>,
    /// Contract to invoke.
    pub contract: ContractAddress,
    /// Amount to send.
    pub amount: CcdAmount,
    /// Entrypoint, `contract.method`.
    pub method: String,
    /// Serialized parameter.
    pub parameter: HexBytes,
    /// Energy budget, the client default if absent.
    pub energy: Option<Energy>,
}

/// Outcome of a contract invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvokeContractResult {
    /// The invocation succeeded.
    Success {
        /// Energy used.
        used_energy: Energy,
        /// Return value, V1 contracts only.
        return_value: Option<HexBytes>,
        /// Execution trace.
        events: Vec<ContractTraceEvent>,
    },
    /// The invocation was rejected.
    Failure {
        /// Energy used.
        used_energy: Energy,
        /// Reason.
        reason: RejectReason,
        /// Return value, V1 contracts only.
        return_value: Option<HexBytes>,
    },
}
