// Identity-provider lifecycle reconciliation.
// Push events arrive signed (Svix scheme); signature verification happens
// before any side effect, and delivery is acknowledged even when the target
// row is already gone.

pub mod handlers;
pub mod signature;
