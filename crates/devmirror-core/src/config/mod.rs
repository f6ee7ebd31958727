//! Configuration management for devmirror.
//!
//! Settings ([`settings::Config`]) are stored as TOML and loaded by the
//! embedding application before the first refresh.

pub mod settings;
