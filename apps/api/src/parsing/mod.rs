// Résumé parsing pipeline: normalize, segment, extract, aggregate.
// Every stage is a pure function of its input; only the vocabulary and the
// name strategy are configured, once, at startup.

pub mod aggregator;
pub mod certifications;
pub mod contact;
pub mod education;
pub mod experience;
pub mod handlers;
pub mod name;
pub mod normalizer;
pub mod projects;
pub mod sections;
pub mod skills;
pub mod summary;
