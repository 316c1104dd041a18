// Authentication and user lifecycle.
// Token verification is offline (RS256 against configured key material);
// every network call to the identity provider goes through `identity`.

pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod provisioning;
pub mod verifier;
