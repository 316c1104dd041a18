// Resume storage.
// Same ownership-scoped CRUD contract as jobs; the structured payload columns
// are opaque jsonb that round-trips verbatim.

pub mod handlers;
