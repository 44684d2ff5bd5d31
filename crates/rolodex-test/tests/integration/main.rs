//! End-to-end tests against the full router.

mod access;
mod discovery;
mod helpers;
mod objects;
mod propfind;
mod report;
mod sync;
