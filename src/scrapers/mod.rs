//! Extraction engine: turning newspaper pages into headline records.
//!
//! # Components
//!
//! | Module | Role |
//! |--------|------|
//! | [`fetch`] | [`fetch::PageFetcher`] trait and the `reqwest` implementation |
//! | [`cascade`] | Ordered selector cascade for front-page headlines, link resolution |
//! | [`filter`] | Per-source acceptance rules for headlines and author articles |
//! | [`freshness`] | "Published today" heuristic from URL dates and urgency words |
//! | [`author`] | Latest article of a configured author, tagged with freshness |
//!
//! Everything except [`fetch`] and [`author::resolve_author`] works on
//! already parsed markup and is free of I/O.

pub mod author;
pub mod cascade;
pub mod fetch;
pub mod filter;
pub mod freshness;
