//! Hash_DRBG over SHA-256 (NIST SP 800-90A, 440-bit seed length)
//!
//! Draw scores come from a generator instantiated with the revealed seeds,
//! so anyone holding both seeds can replay a score off chain.

use sha2::{Digest, Sha256};

const SEEDLEN: usize = 55;
const OUTLEN: usize = 32;

/// Largest supported score width in bytes
pub const MAX_PRECISION: u8 = 4;

pub struct HashDrbg {
    v: [u8; SEEDLEN],
    c: [u8; SEEDLEN],
    reseed_counter: u64,
}

impl HashDrbg {
    /// Instantiate from entropy input; nonce and personalization are folded
    /// into `seed` by the caller.
    pub fn new(seed: &[u8]) -> Self {
        let v = hash_df(&[seed]);
        let c = hash_df(&[&[0x00], &v]);
        Self {
            v,
            c,
            reseed_counter: 1,
        }
    }

    pub fn generate(&mut self, out: &mut [u8]) {
        let mut data = self.v;
        for chunk in out.chunks_mut(OUTLEN) {
            let block = Sha256::digest(data);
            chunk.copy_from_slice(&block[..chunk.len()]);
            add_assign(&mut data, &[1]);
        }

        let h = Sha256::new()
            .chain_update([0x03])
            .chain_update(self.v)
            .finalize();
        let c = self.c;
        add_assign(&mut self.v, &h);
        add_assign(&mut self.v, &c);
        add_assign(&mut self.v, &self.reseed_counter.to_be_bytes());
        self.reseed_counter += 1;
    }
}

/// Score of a draw: the first `precision` generated bytes, little endian.
pub fn score(dseed: &[u8; 32], oseed: &[u8; 32], precision: u8) -> u32 {
    let mut seed = [0u8; 64];
    seed[..32].copy_from_slice(dseed);
    seed[32..].copy_from_slice(oseed);

    let mut out = [0u8; MAX_PRECISION as usize];
    HashDrbg::new(&seed).generate(&mut out);

    let width = usize::from(precision.min(MAX_PRECISION));
    out[..width]
        .iter()
        .rev()
        .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte))
}

fn hash_df(inputs: &[&[u8]]) -> [u8; SEEDLEN] {
    let bits = (SEEDLEN as u32 * 8).to_be_bytes();
    let mut out = [0u8; SEEDLEN];
    for (counter, chunk) in (1u8..).zip(out.chunks_mut(OUTLEN)) {
        let mut hasher = Sha256::new();
        hasher.update([counter]);
        hasher.update(bits);
        for input in inputs {
            hasher.update(input);
        }
        let digest = hasher.finalize();
        chunk.copy_from_slice(&digest[..chunk.len()]);
    }
    out
}

/// `acc = (acc + value) mod 2^440`, both big endian
fn add_assign(acc: &mut [u8; SEEDLEN], value: &[u8]) {
    let mut carry = 0u16;
    for i in 0..SEEDLEN {
        let addend = value
            .len()
            .checked_sub(i + 1)
            .map_or(0, |j| u16::from(value[j]));
        let sum = u16::from(acc[SEEDLEN - 1 - i]) + addend + carry;
        acc[SEEDLEN - 1 - i] = sum as u8;
        carry = sum >> 8;
    }
}
