//! Letter-code sequencing for plant beds.
//!
//! Beds within a garden are labelled A, B, .., Z, then A1, B1, .., Z1,
//! A2 and so on. Freed codes are reused before the sequence grows, so
//! deleting bed "C" means the next bed created becomes "C" again.

use std::collections::HashSet;

const LETTERS: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Code for position `n` in the sequence: A..Z for n in 0..26, then
/// letter plus numeric suffix (A1..Z1, A2..) beyond that.
fn code_at(n: usize) -> String {
    if n < 26 {
        LETTERS[n].to_string()
    } else {
        let offset = n - 26;
        format!("{}{}", LETTERS[offset % 26], offset / 26 + 1)
    }
}

/// First code not present in `existing`. Tolerates duplicates, gaps and
/// arbitrary order in the input, and always produces a value.
pub fn next_letter_code<I, S>(existing: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let taken: HashSet<String> = existing
        .into_iter()
        .map(|code| code.as_ref().to_string())
        .collect();

    let mut n = 0;
    loop {
        let code = code_at(n);
        if !taken.contains(&code) {
            return code;
        }
        n += 1;
    }
}
