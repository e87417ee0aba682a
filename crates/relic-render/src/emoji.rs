use std::collections::HashMap;

use relic_types::EmojiAlias;

use crate::error::EmojiError;

/// Joins the parts of a composite emoji, e.g. `+1::skin-tone-2`.
const COMPOSITE_SEPARATOR: &str = "::";

/// Short-code to glyph table.
pub struct EmojiTable {
    entries: HashMap<String, String>,
}

impl EmojiTable {
    pub fn new(aliases: Vec<EmojiAlias>) -> Self {
        let mut entries = HashMap::with_capacity(aliases.len());
        for alias in aliases {
            entries.entry(alias.name).or_insert(alias.glyph);
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a short-code (no colons) to the glyph it stands for.
    ///
    /// Unknown codes come back unchanged. Composite values and composite
    /// codes are split on `::` and each part is resolved on its own; a value
    /// naming another table entry is followed. Revisiting a code that is
    /// still being expanded is reported as [`EmojiError::CyclicAlias`].
    pub fn resolve(&self, code: &str) -> Result<String, EmojiError> {
        let mut chain = Vec::new();
        self.resolve_in(code, &mut chain)
    }

    fn resolve_in<'a>(&'a self, code: &'a str, chain: &mut Vec<&'a str>) -> Result<String, EmojiError> {
        if chain.contains(&code) {
            let mut cycle: Vec<String> = chain.iter().map(|c| c.to_string()).collect();
            cycle.push(code.to_string());
            return Err(EmojiError::CyclicAlias { chain: cycle });
        }

        let stored = self.entries.get(code).map(String::as_str);
        let value = stored.unwrap_or(code);

        chain.push(code);
        let resolved = if value.contains(COMPOSITE_SEPARATOR) {
            let mut glyph = String::new();
            for part in value.split(COMPOSITE_SEPARATOR) {
                glyph.push_str(&self.resolve_in(part, chain)?);
            }
            glyph
        } else if stored.is_some() && value != code && self.entries.contains_key(value) {
            self.resolve_in(value, chain)?
        } else {
            value.to_string()
        };
        chain.pop();

        Ok(resolved)
    }
}
