use uuid::Uuid;

/// Reference numbers correlate the local ledger row with the gateway-side
/// transaction and double as the idempotency key for settlement. UUIDv7 keeps
/// them time-ordered and collision-resistant regardless of how many requests
/// one user fires within the same clock tick.
pub fn new_reference_no(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::now_v7().simple())
}

pub const TOPUP_PREFIX: &str = "TOP";
pub const QRIS_PREFIX: &str = "QRP";
