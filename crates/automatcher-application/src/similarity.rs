// SPDX-License-Identifier: GPL-3.0-or-later

//! Edit-distance similarity between two names, as an integer percentage.

use deunicode::deunicode;

/// Score for two byte-identical strings; one above any edit-distance result.
pub const IDENTICAL: u32 = 101;

/// Similarity of two names in the range 0..=101.
///
/// Identical inputs score 101. Otherwise both sides are reduced to lowercase
/// ASCII letters and digits (accents stripped, `&` spelled as "and") and scored
/// as `(longest - distance) * 100 / longest`, truncated toward zero. A side that
/// reduces to nothing scores 0.
pub fn similarity(a: &str, b: &str) -> u32 {
    if a == b {
        return IDENTICAL;
    }

    let left = compact(a);
    let right = compact(b);
    if left.is_empty() || right.is_empty() {
        return 0;
    }

    let longest = left.len().max(right.len());
    let distance = levenshtein_distance(&left, &right);
    ((longest - distance) * 100 / longest) as u32
}

/// Reduce a name to its comparable core, e.g. `"Simon & Garfunkel"` to `"simonandgarfunkel"`.
///
/// Every character is transliterated to ASCII first (`"Sıla"` to `"sila"`,
/// `"Þeyr"` to `"theyr"`). Characters with no known transliteration are
/// dropped, so a name made only of those compacts to an empty string.
pub fn compact(value: &str) -> String {
    deunicode(value)
        .to_ascii_lowercase()
        .replace('&', " and ")
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

fn levenshtein_distance(left: &str, right: &str) -> usize {
    let left: &[u8] = left.as_bytes();
    let right: &[u8] = right.as_bytes();

    if left.is_empty() {
        return right.len();
    }
    if right.is_empty() {
        return left.len();
    }

    let mut previous_row: Vec<usize> = (0..=right.len()).collect();
    let mut current_row: Vec<usize> = vec![0; right.len() + 1];

    for (left_index, left_byte) in left.iter().enumerate() {
        current_row[0] = left_index + 1;
        for (right_index, right_byte) in right.iter().enumerate() {
            let insert_cost = current_row[right_index] + 1;
            let delete_cost = previous_row[right_index + 1] + 1;
            let replace_cost = previous_row[right_index] + usize::from(left_byte != right_byte);
            current_row[right_index + 1] = insert_cost.min(delete_cost).min(replace_cost);
        }
        std::mem::swap(&mut previous_row, &mut current_row);
    }

    previous_row[right.len()]
}
