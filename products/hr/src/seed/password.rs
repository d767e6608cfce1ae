use rand::{Rng, seq::SliceRandom};

pub const PASSWORD_LEN: usize = 12;

const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const SPECIAL: &[u8] = b"!@#$%^&*()-_=+?";

/// Twelve characters with at least one upper, lower, digit and special.
pub fn generate_password<R: Rng + ?Sized>(rng: &mut R) -> String {
    let classes = [UPPER, LOWER, DIGITS, SPECIAL];
    let mut chars: Vec<u8> = classes
        .iter()
        .map(|class| class[rng.gen_range(0..class.len())])
        .collect();
    while chars.len() < PASSWORD_LEN {
        let class = classes[rng.gen_range(0..classes.len())];
        chars.push(class[rng.gen_range(0..class.len())]);
    }
    chars.shuffle(rng);
    chars.into_iter().map(char::from).collect()
}
