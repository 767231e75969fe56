//! Temporary staging names.
//! Produces sibling paths `<source>.<prog>.<pid>.<XXXX>` that do not exist yet.
//! The random source is owned by the namer so tests can seed it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::util::lexists;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SUFFIX_LEN: usize = 4;

#[derive(Debug)]
pub struct TempNamer {
    prog: String,
    pid: u32,
    rng: StdRng,
}

impl TempNamer {
    /// Namer seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic namer for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            prog: env!("CARGO_PKG_NAME").to_string(),
            pid: std::process::id(),
            rng,
        }
    }

    fn suffix(&mut self) -> String {
        let letters: String = (0..SUFFIX_LEN)
            .map(|_| LETTERS[self.rng.gen_range(0..LETTERS.len())] as char)
            .collect();
        format!(".{}.{}.{}", self.prog, self.pid, letters)
    }

    /// A path next to `source` that nothing currently occupies.
    pub fn temp_path_for(&mut self, source: &Path) -> PathBuf {
        loop {
            let mut name = OsString::from(source.as_os_str());
            name.push(self.suffix());
            let candidate = PathBuf::from(name);
            if !lexists(&candidate) {
                return candidate;
            }
        }
    }
}

impl Default for TempNamer {
    fn default() -> Self {
        Self::new()
    }
}
