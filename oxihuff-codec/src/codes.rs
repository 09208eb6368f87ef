//! Code table derivation.
//!
//! A [`CodeTable`] maps each symbol to its [`Code`], the path from the root of
//! the Huffman tree to the symbol's leaf (left edge = 0, right edge = 1).
//! [`ReverseCodeTable`] is the inverse mapping used by the decoder.

use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node, NodeId};
use oxihuff_core::error::{OxiHuffError, Result};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Maximum code length (width of the code register).
pub const MAX_CODE_LENGTH: usize = 64;

/// A variable-length bit string of up to [`MAX_CODE_LENGTH`] bits.
///
/// The first bit of the code is the most significant of the `len` low bits of
/// `bits`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Code {
    bits: u64,
    len: u8,
}

impl Code {
    /// The empty bit string.
    pub const EMPTY: Code = Code { bits: 0, len: 0 };

    /// Create a code from its `len` low bits. Returns `None` for lengths
    /// above [`MAX_CODE_LENGTH`].
    pub fn new(bits: u64, len: u8) -> Option<Self> {
        if len as usize > MAX_CODE_LENGTH {
            return None;
        }
        let mask = if len == 64 { u64::MAX } else { (1u64 << len) - 1 };
        Some(Self {
            bits: bits & mask,
            len,
        })
    }

    /// The code bits, right-aligned.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Check if the code has no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append one bit. Returns `None` if the code is already full.
    #[inline]
    pub fn push(self, bit: bool) -> Option<Self> {
        if self.len as usize >= MAX_CODE_LENGTH {
            return None;
        }
        Some(Self {
            bits: (self.bits << 1) | bit as u64,
            len: self.len + 1,
        })
    }

    /// Bit at `index`, counting from the first bit.
    pub fn bit(&self, index: usize) -> bool {
        debug_assert!(index < self.len());
        (self.bits >> (self.len() - 1 - index)) & 1 == 1
    }

    /// Check if `self` is a prefix of `other` (a code is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        self.len == 0 || other.bits >> (other.len - self.len) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len() {
            f.write_str(if self.bit(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = OxiHuffError;

    fn from_str(s: &str) -> Result<Self> {
        let mut code = Code::EMPTY;
        for c in s.chars() {
            let bit = match c {
                '0' => false,
                '1' => true,
                _ => {
                    return Err(OxiHuffError::invalid_code_table(format!(
                        "code {s:?} contains non-binary digit {c:?}"
                    )));
                }
            };
            code = code
                .push(bit)
                .ok_or_else(|| OxiHuffError::code_too_long(s.len(), MAX_CODE_LENGTH))?;
        }
        Ok(code)
    }
}

/// Mapping from symbol to code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, Code>,
}

impl CodeTable {
    /// Derive codes from a tree with an iterative depth-first walk.
    ///
    /// When the root is itself a leaf the sole symbol is given the code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut codes = BTreeMap::new();
        let mut stack: Vec<(NodeId, Code)> = vec![(tree.root(), Code::EMPTY)];

        while let Some((id, code)) = stack.pop() {
            let Some(&node) = tree.node(id) else {
                return Err(OxiHuffError::invalid_code_table(format!("tree has no node {id}")));
            };
            match node {
                Node::Leaf { symbol, .. } => {
                    let code = if code.is_empty() {
                        Code { bits: 0, len: 1 }
                    } else {
                        code
                    };
                    codes.insert(symbol, code);
                }
                Node::Internal { left, right, .. } => {
                    let too_long = || OxiHuffError::code_too_long(code.len() + 1, MAX_CODE_LENGTH);
                    // Right is pushed first so the left subtree is walked first
                    stack.push((right, code.push(true).ok_or_else(too_long)?));
                    stack.push((left, code.push(false).ok_or_else(too_long)?));
                }
            }
        }

        Ok(Self { codes })
    }

    /// Build a table from explicit `(symbol, code)` pairs.
    ///
    /// The codes must be non-empty, distinct and prefix-free.
    pub fn from_codes(pairs: impl IntoIterator<Item = (char, Code)>) -> Result<Self> {
        let mut codes = BTreeMap::new();
        for (symbol, code) in pairs {
            if code.is_empty() {
                return Err(OxiHuffError::invalid_code_table(format!(
                    "symbol {symbol:?} has an empty code"
                )));
            }
            if codes.insert(symbol, code).is_some() {
                return Err(OxiHuffError::invalid_code_table(format!(
                    "symbol {symbol:?} appears twice"
                )));
            }
        }

        let table = Self { codes };
        if let Some((a, b)) = table.find_prefix_conflict() {
            return Err(OxiHuffError::invalid_code_table(format!(
                "code {a} is a prefix of {b}"
            )));
        }
        Ok(table)
    }

    /// Code for `symbol`.
    pub fn get(&self, symbol: char) -> Option<Code> {
        self.codes.get(&symbol).copied()
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check if the table has no symbols.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate over `(symbol, code)` in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, Code)> + '_ {
        self.codes.iter().map(|(&symbol, &code)| (symbol, code))
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// Exact number of bits needed to encode text with these frequencies.
    pub fn encoded_bit_len(&self, frequencies: &FrequencyTable) -> Result<u64> {
        frequencies.iter().try_fold(0u64, |acc, (symbol, count)| {
            let code = self
                .get(symbol)
                .ok_or_else(|| OxiHuffError::unencodable(symbol))?;
            Ok(acc + count * code.len() as u64)
        })
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        self.find_prefix_conflict().is_none()
    }

    /// Find a pair of codes where the first is a prefix of the second.
    ///
    /// In lexicographic order a code that prefixes any other code prefixes
    /// its immediate successor, so adjacent pairs are enough.
    fn find_prefix_conflict(&self) -> Option<(Code, Code)> {
        let mut sorted: Vec<(String, Code)> =
            self.codes.values().map(|c| (c.to_string(), *c)).collect();
        sorted.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        sorted
            .windows(2)
            .find(|w| w[0].1.is_prefix_of(&w[1].1))
            .map(|w| (w[0].1, w[1].1))
    }

    /// Build the decoder's view of this table.
    pub fn reverse(&self) -> ReverseCodeTable {
        ReverseCodeTable::from(self)
    }
}

/// Mapping from code to symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseCodeTable {
    symbols: HashMap<Code, char>,
    max_code_len: usize,
}

impl ReverseCodeTable {
    /// Symbol whose code is exactly `code`.
    #[inline]
    pub fn get(&self, code: &Code) -> Option<char> {
        self.symbols.get(code).copied()
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.max_code_len
    }

    /// Number of codes.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the table has no codes.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl From<&CodeTable> for ReverseCodeTable {
    fn from(table: &CodeTable) -> Self {
        Self {
            symbols: table.iter().map(|(symbol, code)| (code, symbol)).collect(),
            max_code_len: table.max_code_len(),
        }
    }
}

/// Build both code tables for a tree.
pub fn build_code_tables(tree: &HuffmanTree) -> Result<(CodeTable, ReverseCodeTable)> {
    let codes = CodeTable::from_tree(tree)?;
    let reverse = codes.reverse();
    Ok((codes, reverse))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_for(text: &str) -> CodeTable {
        let tree = HuffmanTree::build(&FrequencyTable::from_text(text)).unwrap();
        CodeTable::from_tree(&tree).unwrap()
    }

    fn code(s: &str) -> Code {
        s.parse().unwrap()
    }

    #[test]
    fn test_code_display_parse() {
        assert_eq!(code("0110").to_string(), "0110");
        assert_eq!(code("0110").len(), 4);
        assert_eq!(code("0110").bits(), 0b0110);
        assert_ne!(code("01"), code("001"));
        assert!(Code::EMPTY.to_string().is_empty());
        assert!("012".parse::<Code>().is_err());
    }

    #[test]
    fn test_code_prefix() {
        assert!(code("10").is_prefix_of(&code("101")));
        assert!(code("10").is_prefix_of(&code("10")));
        assert!(!code("11").is_prefix_of(&code("101")));
        assert!(!code("101").is_prefix_of(&code("10")));
        assert!(Code::EMPTY.is_prefix_of(&code("1")));
    }

    #[test]
    fn test_code_register_limit() {
        let full = Code::new(u64::MAX, 64).unwrap();
        assert_eq!(full.len(), MAX_CODE_LENGTH);
        assert!(full.push(false).is_none());
        assert!(Code::new(0, 65).is_none());
        let long = "1".repeat(65);
        assert!(matches!(
            long.parse::<Code>(),
            Err(OxiHuffError::CodeTooLong { .. })
        ));
    }

    #[test]
    fn test_abracadabra_codes() {
        let table = table_for("abracadabra");
        assert_eq!(table.get('a'), Some(code("0")));
        assert_eq!(table.get('c'), Some(code("100")));
        assert_eq!(table.get('d'), Some(code("101")));
        assert_eq!(table.get('b'), Some(code("110")));
        assert_eq!(table.get('r'), Some(code("111")));
        assert!(table.is_prefix_free());
        assert_eq!(table.max_code_len(), 3);

        let freqs = FrequencyTable::from_text("abracadabra");
        assert_eq!(table.encoded_bit_len(&freqs).unwrap(), 23);
    }

    #[test]
    fn test_single_symbol_gets_zero() {
        let table = table_for("aaaa");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get('a'), Some(code("0")));
    }

    #[test]
    fn test_reverse_table() {
        let table = table_for("abracadabra");
        let reverse = table.reverse();
        assert_eq!(reverse.len(), 5);
        assert_eq!(reverse.max_code_len(), 3);
        for (symbol, c) in table.iter() {
            assert_eq!(reverse.get(&c), Some(symbol));
        }
        assert_eq!(reverse.get(&code("1")), None);
    }

    #[test]
    fn test_encoded_bit_len_missing_symbol() {
        let table = table_for("ab");
        let freqs = FrequencyTable::from_text("abc");
        assert!(matches!(
            table.encoded_bit_len(&freqs),
            Err(OxiHuffError::UnencodableSymbol { symbol: 'c' })
        ));
    }

    #[test]
    fn test_from_codes_validation() {
        let ok = CodeTable::from_codes([('a', code("0")), ('b', code("10")), ('c', code("11"))]);
        assert!(ok.is_ok());

        let prefixed = CodeTable::from_codes([('a', code("1")), ('b', code("10"))]);
        assert!(matches!(prefixed, Err(OxiHuffError::InvalidCodeTable { .. })));

        let duplicate = CodeTable::from_codes([('a', code("01")), ('b', code("01"))]);
        assert!(matches!(duplicate, Err(OxiHuffError::InvalidCodeTable { .. })));

        let empty = CodeTable::from_codes([('a', Code::EMPTY)]);
        assert!(matches!(empty, Err(OxiHuffError::InvalidCodeTable { .. })));
    }

    #[test]
    fn test_deep_tree_codes() {
        // Fibonacci frequencies give a maximally unbalanced tree
        let mut text = String::new();
        let (mut x, mut y) = (1usize, 1usize);
        for symbol in "abcdefghijkl".chars() {
            text.extend(std::iter::repeat_n(symbol, x));
            (x, y) = (y, x + y);
        }
        let table = table_for(&text);
        assert_eq!(table.len(), 12);
        assert_eq!(table.max_code_len(), 11);
        assert!(table.is_prefix_free());
    }
}
