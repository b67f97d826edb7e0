// Candidate index: the searchable projection of candidate profiles.
// candidate-profile pushes summaries in; recruiters query them through /search.

pub mod handlers;
pub mod models;
pub mod search;
pub mod store;
