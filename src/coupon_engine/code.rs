//! Deterministic coupon code generation.

const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: u64 = 4;

/// Derives a coupon code from an order count.
///
/// The result has the form `SAVE<discount>-XXXX`. The suffix is drawn from
/// `A-Z0-9` by repeated `mod 36` / `div 36` steps over the seed
/// `order_count * 17 + 42`, with the seed bumped by `i * 7` after each
/// character. The same inputs always produce the same code.
pub fn generate_code(order_count: u64, discount_percent: u32) -> String {
    let base = ALPHABET.len() as u64;
    let mut seed = order_count.wrapping_mul(17).wrapping_add(42);
    let mut code = format!("SAVE{}-", discount_percent);

    for i in 0..SUFFIX_LEN {
        code.push(ALPHABET[(seed % base) as usize] as char);
        seed = seed / base + i * 7;
    }

    code.to_uppercase()
}
