//! Edit-distance cost between a typed query and a point name.
//!
//! Damerau-Levenshtein over Unicode scalar values, computed with three
//! rolling DP rows (the transposition step looks two rows back).

/// Characters dropped from both strings before comparison.
pub const IGNORED_CHARS: [char; 12] = [
    ' ', '"', '\'', '\t', '\n', '\r', '-', '(', ')', '\0', ',', '.',
];

/// Per-operation costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditCosts {
    pub insert: usize,
    pub delete: usize,
    pub substitute: usize,
    pub transpose: usize,
}

impl Default for EditCosts {
    fn default() -> Self {
        Self {
            insert: 1,
            delete: 1,
            substitute: 1,
            transpose: 1,
        }
    }
}

/// Strip [`IGNORED_CHARS`] from `s`.
pub fn normalize(s: &str) -> Vec<char> {
    s.chars().filter(|c| !IGNORED_CHARS.contains(c)).collect()
}

/// Cost of turning candidate `name` into `query` with unit costs.
///
/// # Examples
///
/// ```
/// use waybuilder::resolve::edit_cost;
///
/// assert_eq!(edit_cost("station", "station"), 0);
/// assert_eq!(edit_cost("Nizhny Novgorod", "Nizhny-Novgorod"), 0);
/// assert_eq!(edit_cost("ab", "ba"), 1);
/// assert_eq!(edit_cost("", "abc"), 3);
/// ```
pub fn edit_cost(query: &str, name: &str) -> usize {
    edit_cost_with(query, name, &EditCosts::default())
}

/// [`edit_cost`] with explicit operation costs.
pub fn edit_cost_with(query: &str, name: &str, costs: &EditCosts) -> usize {
    let query = normalize(query);
    let name = normalize(name);
    normalized_cost(&query, &name, costs)
}

/// Cost over strings that are already normalized.
///
/// Memory is three rows of `min(len) + 1` cells when insert and delete
/// cost the same, and three rows over the query otherwise.
pub fn normalized_cost(query: &[char], name: &[char], costs: &EditCosts) -> usize {
    if query.is_empty() {
        return name.len() * costs.insert;
    }
    if name.is_empty() {
        return query.len() * costs.delete;
    }

    // Swapping the strings swaps insert and delete, nothing else.
    if costs.insert == costs.delete && query.len() > name.len() {
        rolling_cost(name, query, costs)
    } else {
        rolling_cost(query, name, costs)
    }
}

/// Rows walk the candidate, columns walk the query. Row `i` lives in
/// `rows[i % 3]`, so rows `i - 1` and `i - 2` are always still alive.
fn rolling_cost(query: &[char], name: &[char], costs: &EditCosts) -> usize {
    let width = query.len() + 1;
    let mut rows = [vec![0usize; width], vec![0usize; width], vec![0usize; width]];

    for j in 1..width {
        rows[0][j] = rows[0][j - 1] + costs.delete;
    }

    for i in 1..=name.len() {
        let cur = i % 3;
        let prev = (i - 1) % 3;
        let prev2 = (i + 1) % 3; // (i - 2) mod 3

        rows[cur][0] = rows[prev][0] + costs.insert;

        for j in 1..width {
            let substitution = if name[i - 1] == query[j - 1] {
                rows[prev][j - 1]
            } else {
                rows[prev][j - 1] + costs.substitute
            };

            let mut best = (rows[prev][j] + costs.insert)
                .min(rows[cur][j - 1] + costs.delete)
                .min(substitution);

            if i > 1 && j > 1 {
                let swapped = name[i - 1] == query[j - 2] && name[i - 2] == query[j - 1];
                let transposition = if swapped {
                    rows[prev2][j - 2] + costs.transpose
                } else {
                    rows[prev2][j - 2] + costs.substitute * 2
                };
                best = best.min(transposition);
            }

            rows[cur][j] = best;
        }
    }

    rows[name.len() % 3][query.len()]
}
