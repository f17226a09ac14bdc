//! Generador de identificadores
//!
//! Dos familias de identificadores:
//! - numéricos (responsables, vehículos): milisegundos desde epoch,
//!   estrictamente crecientes dentro de la sesión, nunca reutilizados;
//! - opacos con prefijo (`REP-`, `MANT-`, `TC-`, `COST-`, `PV-`) seguidos
//!   de nueve caracteres base 36.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TOKEN_LEN: usize = 9;

pub const REPAIR_PREFIX: &str = "REP";
pub const MAINTENANCE_PREFIX: &str = "MANT";
pub const TIRE_CHANGE_PREFIX: &str = "TC";
pub const COST_PREFIX: &str = "COST";
pub const PAYMENT_PREFIX: &str = "PV";

/// Generador de identificadores de una sesión del store
#[derive(Debug)]
pub struct IdGenerator {
    last_numeric: i64,
    rng: StdRng,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            last_numeric: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Generador determinista para tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            last_numeric: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Garantiza que los próximos ids numéricos sean mayores que `floor`
    pub fn observe_numeric(&mut self, floor: i64) {
        if floor > self.last_numeric {
            self.last_numeric = floor;
        }
    }

    /// Siguiente id numérico: aproximación monótona del instante de creación
    pub fn next_numeric(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let next = now.max(self.last_numeric + 1);
        self.last_numeric = next;
        next
    }

    /// Token opaco `PREFIX-xxxxxxxxx`
    pub fn token(&mut self, prefix: &str) -> String {
        let suffix: String = (0..TOKEN_LEN)
            .map(|_| {
                let idx = self.rng.gen_range(0..TOKEN_ALPHABET.len());
                TOKEN_ALPHABET[idx] as char
            })
            .collect();
        format!("{}-{}", prefix, suffix)
    }

    /// Token que no colisiona con ningún id existente según `taken`
    pub fn unique_token(&mut self, prefix: &str, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let candidate = self.token(prefix);
            if !taken(&candidate) {
                return candidate;
            }
        }
    }
}
