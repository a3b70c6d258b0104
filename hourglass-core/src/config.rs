#![forbid(unsafe_code)]

//! Hourglass configuration handling. Parses a TOML file into a strongly-typed
//! structure describing the verifier's group and challenge parameters.
//!
//! Prover and verifier must agree on every value here; a mismatch in any of
//! them makes honest proofs fail to verify. The configuration is read once at
//! start-up and stays fixed for the lifetime of the process.

use serde::Deserialize;
use std::{fs, path::Path};

use crate::codec::decode_hex;
use crate::{VdfError, VdfResult};

/// Widest modulus (and group element) supported, in bytes.
pub const MAX_MODULUS_BYTES: usize = 256;

/// Widest challenge prime: one SHA-256 digest.
pub const MAX_CHALLENGE_BITS: usize = 256;

/// Number of fixed Miller–Rabin bases available (the primes below 1000).
pub const MAX_ROUNDS: usize = 168;

/// Built-in 2048-bit RSA-type modulus. The factors were discarded at
/// generation time.
pub const DEFAULT_MODULUS_HEX: &str = "\
b147f1a84876847c718779b28e4b14d6f8a727a0b366ba4026e2bd4f223f24ca\
2b69c167bb07c7e972861268a9b5c17939673fb7bc6140a00527b2fc13485e3a\
9381445aa4a6a5c79d1e88d161fb7206bfab5415922c417e36939a04e9ffe8d6\
8d39ab12f260f581407de958aa85b9ea485ba86db6a0cc4de87c1b1b4c30406c\
5615a62af32d5541471933aef3633e3c143c94d56291b58b16157c187f738d87\
9292bf48eaaf714609806b121a9a009e679a81e18915f324aea118899d5f6b5f\
0b92c255c3265b5edca4389baff2917bab22607fb2a01eaced7fc0b981870273\
df9d3d0fbf9fd324ad9a043cbbb4e3d70442b2b833d2ce2fc34aaf92f953149d";

/// Primary configuration structure shared across Hourglass components.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VerifierConfig {
    /// Logging verbosity (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: Option<String>,

    /// Group the proofs live in.
    pub group: GroupConfig,

    /// Hash-to-prime challenge parameters.
    pub challenge: ChallengeConfig,
}

/// The ambient group: integers modulo `modulus`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GroupConfig {
    /// Big-endian hex encoding of N, with or without a `0x` prefix.
    pub modulus: String,
}

/// Fiat-Shamir challenge derivation parameters.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChallengeConfig {
    /// Bit length of the derived prime `l`.
    pub bits: usize,
    /// Miller–Rabin rounds per candidate.
    pub rounds: usize,
    /// Candidates tried before giving up.
    pub max_attempts: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            group: GroupConfig::default(),
            challenge: ChallengeConfig::default(),
        }
    }
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self { modulus: DEFAULT_MODULUS_HEX.to_string() }
    }
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self { bits: 168, rounds: 20, max_attempts: 4096 }
    }
}

impl VerifierConfig {
    /// Load a configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> VdfResult<Self> {
        let data = fs::read_to_string(&path).map_err(VdfError::from)?;
        Self::from_toml_str(&data)
    }

    /// Load config alias version
    pub fn load<P: AsRef<Path>>(path: P) -> VdfResult<Self> {
        Self::from_file(path)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(data: &str) -> VdfResult<Self> {
        let cfg = toml::from_str::<VerifierConfig>(data).map_err(VdfError::ConfigParse)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every parameter is usable.
    pub fn validate(&self) -> VdfResult<()> {
        self.group.modulus_bytes()?;
        self.challenge.validate()
    }
}

impl GroupConfig {
    /// Decode the modulus to big-endian bytes with leading zeros removed.
    ///
    /// Fails with [`VdfError::InvalidModulus`] for a zero or even modulus, since
    /// RSA-type groups always have an odd N.
    pub fn modulus_bytes(&self) -> VdfResult<Vec<u8>> {
        let raw = decode_hex(&self.modulus)?;
        let start = raw.iter().position(|b| *b != 0).unwrap_or(raw.len());
        let bytes = raw[start..].to_vec();
        match bytes.last() {
            None => Err(VdfError::InvalidModulus("modulus is zero")),
            Some(low) if low & 1 == 0 => Err(VdfError::InvalidModulus("modulus is even")),
            Some(_) if bytes.len() > MAX_MODULUS_BYTES => Err(VdfError::MalformedInput {
                len: bytes.len(),
                max: MAX_MODULUS_BYTES,
            }),
            Some(_) => Ok(bytes),
        }
    }
}

impl ChallengeConfig {
    pub fn validate(&self) -> VdfResult<()> {
        if !(16..=MAX_CHALLENGE_BITS).contains(&self.bits) {
            return Err(VdfError::InvalidConfig(format!(
                "challenge.bits must be within 16..={MAX_CHALLENGE_BITS}, got {}",
                self.bits
            )));
        }
        if !(1..=MAX_ROUNDS).contains(&self.rounds) {
            return Err(VdfError::InvalidConfig(format!(
                "challenge.rounds must be within 1..={MAX_ROUNDS}, got {}",
                self.rounds
            )));
        }
        if self.max_attempts == 0 {
            return Err(VdfError::InvalidConfig("challenge.max_attempts must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let cfg = VerifierConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.group.modulus_bytes().unwrap().len(), MAX_MODULUS_BYTES);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg = VerifierConfig::from_toml_str("[challenge]\nbits = 256\n").unwrap();
        assert_eq!(cfg.challenge.bits, 256);
        assert_eq!(cfg.challenge.rounds, ChallengeConfig::default().rounds);
        assert_eq!(cfg.group, GroupConfig::default());
    }

    #[test]
    fn rejects_zero_and_even_modulus() {
        let zero = GroupConfig { modulus: "0x0000".into() };
        assert!(matches!(zero.modulus_bytes(), Err(VdfError::InvalidModulus(_))));
        let even = GroupConfig { modulus: "0x1234".into() };
        assert!(matches!(even.modulus_bytes(), Err(VdfError::InvalidModulus(_))));
    }

    #[test]
    fn rejects_oversized_modulus() {
        let wide = GroupConfig { modulus: format!("01{}", "ff".repeat(MAX_MODULUS_BYTES)) };
        assert!(matches!(wide.modulus_bytes(), Err(VdfError::MalformedInput { .. })));
    }

    #[test]
    fn rejects_out_of_range_challenge() {
        let err = VerifierConfig::from_toml_str("[challenge]\nrounds = 0\n").unwrap_err();
        assert!(matches!(err, VdfError::InvalidConfig(_)));
        let err = VerifierConfig::from_toml_str("[challenge]\nbits = 8\n").unwrap_err();
        assert!(matches!(err, VdfError::InvalidConfig(_)));
        let err = VerifierConfig::from_toml_str("[challenge]\nbits = 257\n").unwrap_err();
        assert!(matches!(err, VdfError::InvalidConfig(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"debug\"\n[group]\nmodulus = \"0xc5\"").unwrap();
        let cfg = VerifierConfig::load(file.path()).unwrap();
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        assert_eq!(cfg.group.modulus_bytes().unwrap(), vec![0xc5]);
    }
}
