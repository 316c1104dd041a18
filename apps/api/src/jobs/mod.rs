// Job-application tracking.
// Every query is scoped by the authenticated owner; an unowned id is
// indistinguishable from a missing one (404, never 403).

pub mod handlers;
pub mod stats;
