#![forbid(unsafe_code)]

pub mod codec;
pub mod config;
pub mod error;

pub use codec::{decode_hex, encode_hex};
pub use config::{ChallengeConfig, GroupConfig, VerifierConfig};
pub use error::{VdfError, VdfResult};
