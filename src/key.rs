use crate::consts::{in_alphabet, ALPHABET, ALPHABET_LEN};
use crate::error::{CfResult, CipherError, MappingConflict};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single substitution: every occurrence of `origin` becomes `destination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Mapping {
    pub origin: u8,
    pub destination: u8,
}

impl Mapping {
    pub fn new(origin: u8, destination: u8) -> Self {
        Self {
            origin,
            destination,
        }
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.origin as char, self.destination as char)
    }
}

/// A (possibly partial) substitution key over the fixed alphabet.
///
/// Origins are unique and destinations are unique, so once all 26 mappings
/// are present the key is a bijection. Mappings are kept sorted by origin,
/// which makes position `i` refer to the same origin in every complete key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PermutationKey {
    mappings: Vec<Mapping>,
}

impl PermutationKey {
    pub fn new() -> Self {
        Self {
            mappings: Vec::with_capacity(ALPHABET_LEN),
        }
    }

    /// Maps every symbol to itself.
    pub fn identity() -> Self {
        Self {
            mappings: ALPHABET.iter().map(|&c| Mapping::new(c, c)).collect(),
        }
    }

    /// Builds a complete key where `ALPHABET[i]` maps to `destinations[i]`.
    pub fn from_destinations(destinations: &[u8]) -> CfResult<Self> {
        if destinations.len() != ALPHABET_LEN {
            return Err(CipherError::IncompleteKey {
                len: destinations.len(),
            });
        }

        let mut key = Self::new();
        for (&origin, &destination) in ALPHABET.iter().zip(destinations) {
            key.insert(origin, destination)?;
        }
        Ok(key)
    }

    /// Callers guarantee `destinations` is a permutation of the alphabet.
    pub(crate) fn from_permutation(destinations: &[u8; ALPHABET_LEN]) -> Self {
        let key = Self {
            mappings: ALPHABET
                .iter()
                .zip(destinations.iter())
                .map(|(&o, &d)| Mapping::new(o, d))
                .collect(),
        };
        debug_assert!(key.is_bijective());
        key
    }

    /// Adds `origin -> destination`, rejecting anything that would break the bijection.
    pub fn insert(&mut self, origin: u8, destination: u8) -> CfResult<()> {
        let conflict = if !in_alphabet(origin) || !in_alphabet(destination) {
            Some(MappingConflict::OutsideAlphabet)
        } else if self.by_origin(origin).is_some() {
            Some(MappingConflict::OriginTaken)
        } else if self.by_destination(destination).is_some() {
            Some(MappingConflict::DestinationTaken)
        } else {
            None
        };

        if let Some(conflict) = conflict {
            return Err(CipherError::InvalidMapping {
                origin: origin as char,
                destination: destination as char,
                conflict,
            });
        }

        let pos = self
            .mappings
            .binary_search_by_key(&origin, |m| m.origin)
            .unwrap_or_else(|p| p);
        self.mappings.insert(pos, Mapping::new(origin, destination));
        Ok(())
    }

    /// Removes the pair matching both components. Returns whether anything was removed.
    pub fn remove(&mut self, origin: u8, destination: u8) -> bool {
        match self
            .mappings
            .iter()
            .position(|m| m.origin == origin && m.destination == destination)
        {
            Some(idx) => {
                self.mappings.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn by_origin(&self, origin: u8) -> Option<Mapping> {
        self.mappings
            .binary_search_by_key(&origin, |m| m.origin)
            .ok()
            .map(|idx| self.mappings[idx])
    }

    pub fn by_destination(&self, destination: u8) -> Option<Mapping> {
        self.mappings
            .iter()
            .find(|m| m.destination == destination)
            .copied()
    }

    #[inline]
    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.mappings.len() == ALPHABET_LEN
    }

    /// True when every alphabet symbol appears exactly once as origin and once as destination.
    pub fn is_bijective(&self) -> bool {
        if !self.is_complete() {
            return false;
        }
        let mut seen_origin = [false; 256];
        let mut seen_dest = [false; 256];
        for m in &self.mappings {
            if !in_alphabet(m.origin) || !in_alphabet(m.destination) {
                return false;
            }
            if seen_origin[m.origin as usize] || seen_dest[m.destination as usize] {
                return false;
            }
            seen_origin[m.origin as usize] = true;
            seen_dest[m.destination as usize] = true;
        }
        true
    }

    /// Byte lookup table: `table[origin] = destination`, identity for unmapped bytes.
    pub fn lookup_table(&self) -> [u8; 256] {
        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        for m in &self.mappings {
            table[m.origin as usize] = m.destination;
        }
        table
    }

    /// Substitutes every mapped character; anything without a mapping passes through.
    pub fn apply(&self, text: &str) -> String {
        let table = self.lookup_table();
        text.chars()
            .map(|c| {
                if c.is_ascii() {
                    table[c as usize] as char
                } else {
                    c
                }
            })
            .collect()
    }

    /// The key that undoes this one (destination -> origin).
    pub fn inverse(&self) -> Self {
        let mut mappings: Vec<Mapping> = self
            .mappings
            .iter()
            .map(|m| Mapping::new(m.destination, m.origin))
            .collect();
        mappings.sort_by_key(|m| m.origin);
        Self { mappings }
    }
}

/// Renders a key as the destinations of `a..z`, using `?` for unmapped origins.
impl fmt::Display for PermutationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &origin in ALPHABET.iter() {
            let c = self
                .by_origin(origin)
                .map(|m| m.destination as char)
                .unwrap_or('?');
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl FromStr for PermutationKey {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: Vec<u8> = s.trim().bytes().map(|b| b.to_ascii_lowercase()).collect();
        Self::from_destinations(&bytes)
    }
}

impl From<PermutationKey> for String {
    fn from(key: PermutationKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for PermutationKey {
    type Error = CipherError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
