//! Static credential lookup.
//!
//! Two immutable sets, built once at startup: authorized access codes and
//! authorized card identifiers. There is no runtime mutation and no
//! persistence; that is the whole point of this store.

use std::collections::HashSet;

use latchkey_core::{
    AccessCode, CardId, Result,
    constants::{AUTHORIZED_CARDS, AUTHORIZED_CODES},
};

/// Immutable authorized-credential sets.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    codes: HashSet<AccessCode>,
    cards: HashSet<CardId>,
}

impl CredentialStore {
    /// Build a store from explicit credential sets.
    pub fn new(codes: HashSet<AccessCode>, cards: HashSet<CardId>) -> Self {
        Self { codes, cards }
    }

    /// Build the store from the build-time credential lists.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured credential fails validation;
    /// that is a build misconfiguration, caught at startup.
    pub fn from_constants() -> Result<Self> {
        let codes = AUTHORIZED_CODES
            .iter()
            .map(|c| AccessCode::new(c))
            .collect::<Result<HashSet<_>>>()?;
        let cards = AUTHORIZED_CARDS
            .iter()
            .map(|c| CardId::new(c))
            .collect::<Result<HashSet<_>>>()?;

        Ok(Self::new(codes, cards))
    }

    /// Whether the code is authorized.
    #[must_use]
    pub fn is_code_authorized(&self, code: &AccessCode) -> bool {
        self.codes.contains(code)
    }

    /// Whether the card identifier is authorized.
    #[must_use]
    pub fn is_card_authorized(&self, card: &CardId) -> bool {
        self.cards.contains(card)
    }

    /// Number of authorized codes.
    pub fn code_count(&self) -> usize {
        self.codes.len()
    }

    /// Number of authorized cards.
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }
}
