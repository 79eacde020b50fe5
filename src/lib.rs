//! Neptune ROI: lab trial cost calculator
//!
//! Estimates what running colour, pigment and recipe trials on production
//! lines costs a masterbatch or plastics factory each year, captures the
//! prospect's contact details and writes a shareable ROI report.

pub mod cli;
pub mod core;
pub mod lead;
pub mod report;
pub mod schema;
