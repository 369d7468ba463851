//! Resource-Usage Extractor
//!
//! Smart-contract resource data lives in the v1 transaction extension. For a
//! fee-bump it lives on the wrapped transaction, one level down.

use shared_types::{FeeBumpInnerTx, SorobanTransactionData, TransactionEnvelope};

use crate::domain::value_objects::ResourceUsage;

/// Resource usage declared by `envelope`, or `None` for non-contract
/// transactions.
pub fn extract_resource_usage(envelope: &TransactionEnvelope) -> Option<ResourceUsage> {
    let data = match envelope {
        TransactionEnvelope::Tx(env) => env.tx.ext.soroban_data(),
        TransactionEnvelope::FeeBump(env) => match &env.tx.inner_tx {
            FeeBumpInnerTx::Tx(inner) => inner.tx.ext.soroban_data(),
        },
        // Legacy envelopes predate the extension.
        TransactionEnvelope::TxV0(_) => None,
    }?;

    Some(to_usage(data))
}

fn to_usage(data: &SorobanTransactionData) -> ResourceUsage {
    ResourceUsage {
        resource_fee: data.resource_fee,
        instructions: data.resources.instructions,
        read_bytes: data.resources.read_bytes,
        write_bytes: data.resources.write_bytes,
    }
}
