// SPDX-License-Identifier: Unlicense
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A terminal was given a payload of the wrong type.
    #[error("type error: expected {expected} payload, found {found}")]
    Type {
        expected: &'static str,
        found: &'static str,
    },
    #[error("no value bound to symbol `{0}`")]
    UnboundSymbol(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
