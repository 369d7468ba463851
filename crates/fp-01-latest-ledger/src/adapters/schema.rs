//! GraphQL schema exported alongside the processor.

/// Type definition of the `LatestLedger` record.
pub fn schema_definition() -> &'static str {
    r#"
type LatestLedger {
    sequence: Int!
    hash: String!
    transactionCount: Int!
    txSetOperationCount: Int!
    successfulOperationCount: Int!
    successfulTxCount: Int!
    failedTxCount: Int!
    totalFeeCharged: String!
    closedAt: String!
    baseFee: Int!
    transactionsPerSecond: Float!
    sorobanTxCount: Int!
    totalSorobanFees: String!
    totalResourceInstructions: String!
    totalReadBytes: String!
    totalWriteBytes: String!
    skippedTxCount: Int!
    unknownTxCount: Int!
}
"#
}

/// Query fields served from `LatestLedger` records.
pub fn query_definitions() -> &'static str {
    r#"
    latestLedger: LatestLedger
    ledgerBySequence(sequence: Int!): LatestLedger
"#
}
