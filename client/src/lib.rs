//! Duplicate-safe user directory client.
//!
//! The crate keeps a local cache of remote user records and refuses any add or
//! edit that would duplicate an id, email or username. It also nests flat
//! comment lists into one-level reply forests.
//!
//! Layout follows a ports-and-adapters split:
//! - [`domain`]: records, reconciliation rules and services;
//! - [`outbound`]: the HTTP source and notification adapters;
//! - [`inbound`]: the command-line front end;
//! - [`config`]: settings loaded from the environment and config files.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
