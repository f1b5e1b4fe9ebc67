//! Helper utilities for getting records into a session.

pub mod record_reader;
