//! Code tables: symbol to prefix code, and back.
//!
//! A [`CodeTable`] is generated once from a Huffman tree, persisted by the
//! caller next to the packed stream, and handed back for decoding. Every way
//! of constructing one (tree walk, explicit pairs, deserialization) upholds
//! the same invariant: codes are non-empty, unique, and prefix-free.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use huffpress_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::frequency::FrequencyTable;
use crate::tree::HuffmanNode;

/// A non-empty string of binary digits; `'0'` is a left branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code(String);

impl Code {
    /// Number of bits.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bits in transmission order.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.bytes().map(|b| b == b'1')
    }

    /// Check if `self` is a prefix of (or equal to) `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl FromStr for Code {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::invalid_table("empty code"));
        }
        if let Some(bad) = s.chars().find(|c| !matches!(c, '0' | '1')) {
            return Err(Error::invalid_table(format!(
                "code {s:?} contains non-binary digit {bad:?}"
            )));
        }
        Ok(Code(s.to_owned()))
    }
}

impl TryFrom<String> for Code {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bijective mapping from symbol to prefix code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<char, Code>", into = "BTreeMap<char, Code>")]
pub struct CodeTable {
    codes: BTreeMap<char, Code>,
}

impl CodeTable {
    /// Derive the code of every leaf by walking the tree depth-first.
    ///
    /// A lone-leaf tree has an empty root-to-leaf path; its symbol gets `"0"`.
    pub fn generate(root: &HuffmanNode) -> Self {
        let mut codes = BTreeMap::new();
        match root {
            HuffmanNode::Leaf { symbol, .. } => {
                codes.insert(*symbol, Code("0".to_owned()));
            }
            HuffmanNode::Internal { .. } => {
                let mut path = String::with_capacity(root.depth());
                collect_codes(root, &mut path, &mut codes);
            }
        }
        CodeTable { codes }
    }

    /// Build a table from explicit `(symbol, code)` pairs.
    ///
    /// # Errors
    /// [`Error::InvalidCodeTable`] if a symbol repeats, two codes are equal,
    /// or one code is a prefix of another.
    pub fn from_codes<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, Code)>,
    {
        let mut codes = BTreeMap::new();
        for (symbol, code) in pairs {
            if codes.insert(symbol, code).is_some() {
                return Err(Error::invalid_table(format!(
                    "symbol {symbol:?} has more than one code"
                )));
            }
        }
        Self::validated(codes)
    }

    fn validated(codes: BTreeMap<char, Code>) -> Result<Self> {
        // After sorting, a prefix always sits directly before some code it prefixes.
        let mut sorted: Vec<(&Code, char)> = codes.iter().map(|(&s, c)| (c, s)).collect();
        sorted.sort_unstable();
        for pair in sorted.windows(2) {
            let ((a, sym_a), (b, sym_b)) = (pair[0], pair[1]);
            if a.is_prefix_of(b) {
                return Err(Error::invalid_table(format!(
                    "code {a} of {sym_a:?} is a prefix of code {b} of {sym_b:?}"
                )));
            }
        }
        Ok(CodeTable { codes })
    }

    /// Code of `symbol`, if present.
    pub fn get(&self, symbol: char) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Length of the longest code, 0 for an empty table.
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// Inverse mapping, code to symbol.
    pub fn inverse(&self) -> BTreeMap<&Code, char> {
        self.codes.iter().map(|(&symbol, code)| (code, symbol)).collect()
    }

    /// Build the bitwise decoding trie for this table.
    pub fn decoder(&self) -> DecodeTrie {
        DecodeTrie::new(self)
    }

    /// Total payload bits needed to encode text with these frequencies.
    ///
    /// # Errors
    /// [`Error::MissingCode`] for the first symbol without a code.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> Result<usize> {
        frequencies.iter().try_fold(0usize, |total, (symbol, count)| {
            let code = self.get(symbol).ok_or_else(|| Error::missing_code(symbol))?;
            Ok(total + code.len() * count as usize)
        })
    }
}

impl TryFrom<BTreeMap<char, Code>> for CodeTable {
    type Error = Error;

    fn try_from(codes: BTreeMap<char, Code>) -> Result<Self> {
        Self::validated(codes)
    }
}

impl From<CodeTable> for BTreeMap<char, Code> {
    fn from(table: CodeTable) -> Self {
        table.codes
    }
}

fn collect_codes(node: &HuffmanNode, path: &mut String, codes: &mut BTreeMap<char, Code>) {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, Code(path.clone()));
        }
        HuffmanNode::Internal { left, right, .. } => {
            path.push('0');
            collect_codes(left, path, codes);
            path.pop();

            path.push('1');
            collect_codes(right, path, codes);
            path.pop();
        }
    }
}

/// Index of a node inside a [`DecodeTrie`].
pub type TrieIndex = u32;

#[derive(Debug, Clone, Copy, Default)]
struct TrieNode {
    children: [Option<TrieIndex>; 2],
    symbol: Option<char>,
}

/// Binary trie over the codes of a [`CodeTable`].
///
/// Decoding walks one edge per input bit; reaching a symbol emits it and
/// returns to the root. A missing edge means no code starts with the bits
/// read so far.
#[derive(Debug, Clone)]
pub struct DecodeTrie {
    nodes: Vec<TrieNode>,
}

impl DecodeTrie {
    /// Root node index.
    pub const ROOT: TrieIndex = 0;

    /// Build the trie. The table is prefix-free, so symbols only sit on leaves.
    pub fn new(table: &CodeTable) -> Self {
        let mut nodes = vec![TrieNode::default()];
        for (symbol, code) in table.iter() {
            let mut cursor = Self::ROOT as usize;
            for bit in code.bits() {
                let slot = bit as usize;
                cursor = match nodes[cursor].children[slot] {
                    Some(next) => next as usize,
                    None => {
                        let next = nodes.len();
                        nodes.push(TrieNode::default());
                        nodes[cursor].children[slot] = Some(next as TrieIndex);
                        next
                    }
                };
            }
            nodes[cursor].symbol = Some(symbol);
        }
        DecodeTrie { nodes }
    }

    /// Follow the edge for `bit`, or `None` if no code continues that way.
    #[inline]
    pub fn step(&self, from: TrieIndex, bit: bool) -> Option<TrieIndex> {
        self.nodes[from as usize].children[bit as usize]
    }

    /// Symbol completed at `at`, if any.
    #[inline]
    pub fn symbol(&self, at: TrieIndex) -> Option<char> {
        self.nodes[at as usize].symbol
    }

    /// Number of trie nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build_tree;

    fn code(s: &str) -> Code {
        s.parse().unwrap()
    }

    fn table_for(text: &str) -> CodeTable {
        CodeTable::generate(&build_tree(&FrequencyTable::count(text)).unwrap())
    }

    #[test]
    fn test_code_parse() {
        assert_eq!(code("0101").len(), 4);
        assert!("".parse::<Code>().is_err());
        assert!("012".parse::<Code>().is_err());
        assert_eq!(code("110").bits().collect::<Vec<_>>(), vec![true, true, false]);
    }

    #[test]
    fn test_generate_aaabbc() {
        let table = table_for("aaabbc");
        assert_eq!(table.get('a'), Some(&code("0")));
        assert_eq!(table.get('c'), Some(&code("10")));
        assert_eq!(table.get('b'), Some(&code("11")));
        assert_eq!(table.max_code_len(), 2);
    }

    #[test]
    fn test_generate_single_symbol_gets_zero() {
        let table = table_for("qqqq");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get('q').map(Code::as_str), Some("0"));
    }

    #[test]
    fn test_generate_is_fresh_per_call() {
        // Codes from one tree must not leak into the next table.
        let first = table_for("aaabbc");
        let second = table_for("xy");
        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 2);
        assert!(second.get('a').is_none());
    }

    #[test]
    fn test_generated_table_is_prefix_free() {
        let table = table_for("the quick brown fox jumps over the lazy dog.\n123456789");
        let pairs: Vec<(char, Code)> = table.iter().map(|(s, c)| (s, c.clone())).collect();
        assert!(CodeTable::from_codes(pairs).is_ok());
    }

    #[test]
    fn test_from_codes_rejects_prefix() {
        let result = CodeTable::from_codes([('a', code("0")), ('b', code("01"))]);
        assert!(matches!(result, Err(Error::InvalidCodeTable(_))));
    }

    #[test]
    fn test_from_codes_rejects_duplicate_code() {
        let result = CodeTable::from_codes([('a', code("10")), ('b', code("10"))]);
        assert!(matches!(result, Err(Error::InvalidCodeTable(_))));
    }

    #[test]
    fn test_from_codes_rejects_repeated_symbol() {
        let result = CodeTable::from_codes([('a', code("0")), ('a', code("1"))]);
        assert!(matches!(result, Err(Error::InvalidCodeTable(_))));
    }

    #[test]
    fn test_inverse() {
        let table = table_for("aaabbc");
        let inverse = table.inverse();
        assert_eq!(inverse.get(&code("0")), Some(&'a'));
        assert_eq!(inverse.get(&code("10")), Some(&'c'));
        assert_eq!(inverse.len(), 3);
    }

    #[test]
    fn test_encoded_bits() {
        let freq = FrequencyTable::count("aaabbc");
        let table = table_for("aaabbc");
        assert_eq!(table.encoded_bits(&freq).unwrap(), 3 + 2 * 2 + 2);

        let other = FrequencyTable::count("d");
        assert!(matches!(
            table.encoded_bits(&other),
            Err(Error::MissingCode { symbol: 'd' })
        ));
    }

    #[test]
    fn test_decode_trie_walk() {
        let trie = table_for("aaabbc").decoder();
        let one = trie.step(DecodeTrie::ROOT, true).unwrap();
        assert_eq!(trie.symbol(one), None);
        let c = trie.step(one, false).unwrap();
        assert_eq!(trie.symbol(c), Some('c'));
        assert_eq!(trie.step(c, false), None);
    }

    #[test]
    fn test_serde_roundtrip_json() {
        let table = table_for("hello world.");
        let json = serde_json::to_string(&table).unwrap();
        let restored: CodeTable = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, table);
    }

    #[test]
    fn test_deserialize_rejects_non_prefix_free() {
        let json = r#"{"a":"1","b":"10"}"#;
        assert!(serde_json::from_str::<CodeTable>(json).is_err());
        let json = r#"{"a":"1","b":"2"}"#;
        assert!(serde_json::from_str::<CodeTable>(json).is_err());
    }
}
