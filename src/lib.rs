//! Collects patient experience narratives from a rare-disease community
//! and annotates each one with a rule-based diagnosis status and a coarse
//! illness timeline. Four stages, each a plain CSV-to-CSV transform:
//! scrape, clean, filter, annotate.

pub mod config;
pub mod corpus;
pub mod scrape;
pub mod triage;
