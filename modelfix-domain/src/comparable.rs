//! Ordered view of a version string, used for range bound checks.
//!
//! Ordering follows the usual repository rules: a version is split into numeric and
//! qualifier items on `.`, `-` and digit/letter transitions, numbers compare numerically,
//! trailing "null" items (`0`, `ga`, `final`, `release`, empty) are dropped, and well-known
//! qualifiers order as `alpha < beta < milestone < rc < snapshot < release < sp`.

use std::cmp::Ordering;
use std::fmt;

const QUALIFIERS: &[&str] = &["alpha", "beta", "milestone", "rc", "snapshot", "", "sp"];
const RELEASE_INDEX: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    /// Decimal digits without leading zeros; `"0"` for zero.
    Int(String),
    Str(String),
}

/// A position in one list of a version: a plain item, or the nested list at `level`.
#[derive(Clone, Copy)]
enum Entry<'a> {
    Item(&'a Item),
    List(usize),
}

/// A version split into items.
///
/// Each `-` and each digit/letter transition opens a list nested as the last entry of the
/// one before it, so the nesting is a single chain. `levels[k]` holds the plain items of the
/// list at depth `k`; the list at depth `k + 1`, when present, follows them. Keeping the
/// chain flat lets arbitrarily long versions parse, compare and drop without recursion.
#[derive(Debug, Clone)]
pub struct ComparableVersion {
    original: String,
    levels: Vec<Vec<Item>>,
}

impl ComparableVersion {
    pub fn new(version: &str) -> Self {
        Self {
            original: version.to_string(),
            levels: parse(version),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }

    fn list_len(&self, level: usize) -> usize {
        self.levels[level].len() + usize::from(level + 1 < self.levels.len())
    }

    fn entry(&self, level: usize, index: usize) -> Option<Entry<'_>> {
        let items = &self.levels[level];
        match items.get(index) {
            Some(item) => Some(Entry::Item(item)),
            None if index == items.len() && level + 1 < self.levels.len() => {
                Some(Entry::List(level + 1))
            }
            None => None,
        }
    }

    /// Compare an entry against a missing one, descending into nested lists by their
    /// first entry.
    fn compare_to_missing<'a>(&'a self, mut entry: Entry<'a>) -> Ordering {
        loop {
            match entry {
                Entry::Item(item) => return compare_item_to_missing(item),
                Entry::List(level) => match self.entry(level, 0) {
                    Some(first) => entry = first,
                    None => return Ordering::Equal,
                },
            }
        }
    }
}

impl fmt::Display for ComparableVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialEq for ComparableVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ComparableVersion {}

impl PartialOrd for ComparableVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComparableVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // Nested lists are always the last entry of their parent, so meeting two of them
        // ends the current level and comparison continues one level down.
        let mut level = 0;
        'levels: loop {
            let len = self.list_len(level).max(other.list_len(level));
            for i in 0..len {
                let ord = match (self.entry(level, i), other.entry(level, i)) {
                    (None, None) => Ordering::Equal,
                    (None, Some(r)) => other.compare_to_missing(r).reverse(),
                    (Some(l), None) => self.compare_to_missing(l),
                    (Some(Entry::List(next)), Some(Entry::List(_))) => {
                        level = next;
                        continue 'levels;
                    }
                    (Some(Entry::Item(l)), Some(Entry::Item(r))) => compare_items(l, r),
                    (Some(Entry::Item(l)), Some(Entry::List(_))) => compare_item_to_list(l),
                    (Some(Entry::List(_)), Some(Entry::Item(r))) => {
                        compare_item_to_list(r).reverse()
                    }
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            return Ordering::Equal;
        }
    }
}

fn parse(version: &str) -> Vec<Vec<Item>> {
    let version = version.to_lowercase();
    let chars: Vec<char> = version.chars().collect();
    let sub = |from: usize, to: usize| chars[from..to].iter().collect::<String>();

    let mut levels: Vec<Vec<Item>> = Vec::new();
    let mut current: Vec<Item> = Vec::new();
    let mut is_digit = false;
    let mut start = 0;

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '.' | '-' => {
                if i == start {
                    current.push(Item::Int("0".to_string()));
                } else {
                    current.push(parse_item(is_digit, &sub(start, i)));
                }
                start = i + 1;
                if c == '-' {
                    levels.push(std::mem::take(&mut current));
                }
            }
            c if c.is_ascii_digit() => {
                if !is_digit && i > start {
                    current.push(string_item(&sub(start, i), true));
                    start = i;
                    levels.push(std::mem::take(&mut current));
                }
                is_digit = true;
            }
            _ => {
                if is_digit && i > start {
                    current.push(parse_item(true, &sub(start, i)));
                    start = i;
                    levels.push(std::mem::take(&mut current));
                }
                is_digit = false;
            }
        }
    }

    if chars.len() > start {
        current.push(parse_item(is_digit, &sub(start, chars.len())));
    }
    levels.push(current);

    normalize(&mut levels);
    levels
}

/// Drop trailing null items of every list, innermost first. A nested list left empty is
/// itself null and disappears from its parent.
fn normalize(levels: &mut Vec<Vec<Item>>) {
    for level in (0..levels.len()).rev() {
        let items = &mut levels[level];
        while items.last().is_some_and(is_null) {
            items.pop();
        }
        if level > 0 && level + 1 == levels.len() && levels[level].is_empty() {
            levels.pop();
        }
    }
}

fn parse_item(is_digit: bool, buf: &str) -> Item {
    if is_digit {
        let trimmed = buf.trim_start_matches('0');
        if trimmed.is_empty() {
            Item::Int("0".to_string())
        } else {
            Item::Int(trimmed.to_string())
        }
    } else {
        string_item(buf, false)
    }
}

fn string_item(value: &str, followed_by_digit: bool) -> Item {
    let value = match value {
        "a" if followed_by_digit => "alpha",
        "b" if followed_by_digit => "beta",
        "m" if followed_by_digit => "milestone",
        "ga" | "final" | "release" => "",
        "cr" => "rc",
        other => other,
    };
    Item::Str(value.to_string())
}

fn is_null(item: &Item) -> bool {
    match item {
        Item::Int(v) => v == "0",
        Item::Str(v) => qualifier_rank(v) == (RELEASE_INDEX, ""),
    }
}

fn qualifier_rank(q: &str) -> (usize, &str) {
    match QUALIFIERS.iter().position(|k| *k == q) {
        Some(idx) => (idx, ""),
        None => (QUALIFIERS.len(), q),
    }
}

fn compare_ints(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_items(left: &Item, right: &Item) -> Ordering {
    match (left, right) {
        (Item::Int(a), Item::Int(b)) => compare_ints(a, b),
        (Item::Int(_), Item::Str(_)) => Ordering::Greater,
        (Item::Str(a), Item::Str(b)) => qualifier_rank(a).cmp(&qualifier_rank(b)),
        (Item::Str(_), Item::Int(_)) => Ordering::Less,
    }
}

/// Numbers sort after a nested list, qualifiers before it.
fn compare_item_to_list(item: &Item) -> Ordering {
    match item {
        Item::Int(_) => Ordering::Greater,
        Item::Str(_) => Ordering::Less,
    }
}

fn compare_item_to_missing(item: &Item) -> Ordering {
    match item {
        Item::Int(v) if v == "0" => Ordering::Equal,
        Item::Int(_) => Ordering::Greater,
        Item::Str(v) => qualifier_rank(v).cmp(&(RELEASE_INDEX, "")),
    }
}
