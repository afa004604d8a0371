//! # IO Layer
//!
//! Translation between the outside world and the domain: the REST API and the
//! spreadsheet encoder used by the export download.

pub mod rest;
pub mod spreadsheet;
