//! Shared username state for the signup flow.
//!
//! One `UsernameRegistry` instance is shared across all callers (wrap it
//! in an `Arc`). It owns two tables keyed by normalized username: the
//! claim table (name -> owner) and the attempt counters (name -> checks).
//! The tables are independently safe for concurrent access; there is no
//! cross-table atomicity, and none of the operations needs it.

use crate::config::Config;
use crate::error::{AppResult, DomainError};
use crate::models::types::OwnerId;
use crate::models::username::Username;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub struct UsernameRegistry {
    /// name -> owner. Entries are created by a winning claim and never
    /// mutated or removed afterwards; there is no unregister.
    claims: DashMap<Username, OwnerId>,
    /// name -> availability-check count. Created lazily on first check,
    /// monotonically non-decreasing.
    attempts: DashMap<Username, AtomicU64>,
    max_suffix_probes: usize,
}

impl UsernameRegistry {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(cfg: Config) -> Self {
        Self {
            claims: DashMap::new(),
            attempts: DashMap::new(),
            max_suffix_probes: cfg.max_suffix_probes,
        }
    }

    /// Whether `raw` (after normalization) is still unclaimed.
    ///
    /// Always bumps the attempt counter for the normalized key, claimed
    /// or not; the bump is visible to [`Self::most_attempted`] as soon as
    /// this call returns and is never rolled back.
    pub fn check_availability(&self, raw: &str) -> bool {
        let name = Username::normalize(raw);
        self.attempts
            .entry(name.clone())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);

        !self.claims.contains_key(name.as_str())
    }

    /// Atomically claim `raw` (after normalization) for `owner`.
    ///
    /// Returns true iff this call created the claim. A name already
    /// claimed by anyone, the same owner included, stays untouched and
    /// yields false. Under contention on one key exactly one caller wins.
    ///
    /// Attempt counters are not consulted or updated here.
    pub fn register_username(&self, raw: &str, owner: OwnerId) -> bool {
        let name = Username::normalize(raw);
        // or_insert_with runs the closure only for a vacant slot, under
        // the shard lock; losers never touch the stored owner.
        let mut claimed = false;
        self.claims.entry(name).or_insert_with(|| {
            claimed = true;
            owner
        });
        claimed
    }

    /// Generate alternatives for a taken name: the first three unclaimed
    /// numeric-suffix variants (`name1`, `name2`, ...), plus the
    /// dots-for-underscores variant when the name contains `_` and that
    /// variant is free.
    ///
    /// Read-only: nothing is claimed or reserved, so any suggestion can be
    /// taken by another caller before this one acts on it. Callers must
    /// re-validate through [`Self::register_username`].
    ///
    /// The suffix search is capped at `max_suffix_probes` probes; past the
    /// cap it returns [`DomainError::SuggestionsExhausted`] rather than
    /// scanning suffixes forever.
    pub fn suggest_alternatives(&self, raw: &str) -> AppResult<Vec<String>> {
        let name = Username::normalize(raw);
        let mut suggestions: Vec<String> = Vec::with_capacity(4);

        let mut suffix: u64 = 1;
        while suggestions.len() < 3 {
            if suffix as usize > self.max_suffix_probes {
                tracing::warn!(base = %name, probes = self.max_suffix_probes, "suffix search exhausted");
                return Err(DomainError::SuggestionsExhausted {
                    base: name.into_string(),
                    probes: self.max_suffix_probes,
                });
            }
            // Suffix digits introduce no case or whitespace, so the
            // candidate is already in normalized form.
            let candidate = format!("{name}{suffix}");
            if !self.claims.contains_key(candidate.as_str()) {
                suggestions.push(candidate);
            }
            suffix += 1;
        }

        if name.as_str().contains('_') {
            let dotted = name.as_str().replace('_', ".");
            if !self.claims.contains_key(dotted.as_str()) {
                suggestions.push(dotted);
            }
        }

        Ok(suggestions)
    }

    /// The key with the highest attempt count, or `None` on a fresh
    /// registry. Ties are broken arbitrarily.
    pub fn most_attempted(&self) -> Option<Username> {
        let mut best: Option<(Username, u64)> = None;
        for entry in self.attempts.iter() {
            let count = entry.value().load(Ordering::Relaxed);
            match &best {
                Some((_, max)) if *max >= count => {}
                _ => best = Some((entry.key().clone(), count)),
            }
        }
        best.map(|(name, _)| name)
    }

    /// Read-only probe: how often `raw` (after normalization) has been
    /// checked. Absent key reads as 0.
    pub fn attempt_count(&self, raw: &str) -> u64 {
        let name = Username::normalize(raw);
        self.attempts
            .get(name.as_str())
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Read-only probe: the owner holding `raw` (after normalization),
    /// if any.
    pub fn owner_of(&self, raw: &str) -> Option<OwnerId> {
        let name = Username::normalize(raw);
        self.claims.get(name.as_str()).map(|o| o.value().clone())
    }
}

impl Default for UsernameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(s: &str) -> OwnerId {
        OwnerId::new(s)
    }

    #[test]
    fn availability_reflects_claims() {
        let reg = UsernameRegistry::new();
        assert!(reg.check_availability("bob"));

        assert!(reg.register_username("alice", owner("u1")));
        assert!(!reg.check_availability("ALICE "));
        assert!(reg.check_availability("bob"));
    }

    #[test]
    fn duplicate_claim_loses_and_leaves_original() {
        let reg = UsernameRegistry::new();
        assert!(reg.register_username("alice", owner("u1")));
        assert!(!reg.register_username(" Alice", owner("u2")));
        assert!(!reg.register_username("alice", owner("u1")));
        assert_eq!(reg.owner_of("alice"), Some(owner("u1")));
    }

    #[test]
    fn attempts_accumulate_across_variants() {
        let reg = UsernameRegistry::new();
        reg.check_availability("admin");
        reg.check_availability(" ADMIN ");
        reg.check_availability("Admin");

        assert_eq!(reg.attempt_count("admin"), 3);
        assert_eq!(reg.most_attempted().unwrap().as_str(), "admin");
    }

    #[test]
    fn attempts_count_unavailable_checks_too() {
        let reg = UsernameRegistry::new();
        reg.register_username("taken", owner("u1"));
        reg.check_availability("taken");
        reg.check_availability("taken");
        assert_eq!(reg.attempt_count("taken"), 2);
    }

    #[test]
    fn most_attempted_empty_registry() {
        let reg = UsernameRegistry::new();
        assert!(reg.most_attempted().is_none());
    }

    #[test]
    fn most_attempted_picks_the_maximum() {
        let reg = UsernameRegistry::new();
        reg.check_availability("rare");
        for _ in 0..5 {
            reg.check_availability("hot");
        }
        assert_eq!(reg.most_attempted().unwrap().as_str(), "hot");
    }

    #[test]
    fn suggestions_skip_claimed_suffixes() {
        let reg = UsernameRegistry::new();
        reg.register_username("john_doe", owner("u1"));
        reg.register_username("john_doe1", owner("u2"));
        reg.register_username("john_doe2", owner("u3"));

        let got = reg.suggest_alternatives("john_doe").unwrap();
        assert_eq!(got, vec!["john_doe3", "john_doe4", "john_doe5", "john.doe"]);
    }

    #[test]
    fn dot_variant_only_for_underscored_names_and_only_if_free() {
        let reg = UsernameRegistry::new();
        reg.register_username("plain", owner("u1"));
        let got = reg.suggest_alternatives("plain").unwrap();
        assert_eq!(got, vec!["plain1", "plain2", "plain3"]);

        reg.register_username("a_b", owner("u2"));
        reg.register_username("a.b", owner("u3"));
        let got = reg.suggest_alternatives("a_b").unwrap();
        assert_eq!(got, vec!["a_b1", "a_b2", "a_b3"]);
    }

    #[test]
    fn suggestions_do_not_claim_anything() {
        let reg = UsernameRegistry::new();
        reg.register_username("pat", owner("u1"));
        let got = reg.suggest_alternatives("pat").unwrap();
        for candidate in &got {
            assert!(reg.check_availability(candidate), "{candidate} came back claimed");
        }
    }

    #[test]
    fn suggest_exhausts_at_probe_cap() {
        let reg = UsernameRegistry::with_config(Config { max_suffix_probes: 5 });
        for i in 1..=5 {
            reg.register_username(&format!("dense{i}"), owner("squatter"));
        }

        match reg.suggest_alternatives("dense") {
            Err(DomainError::SuggestionsExhausted { base, probes }) => {
                assert_eq!(base, "dense");
                assert_eq!(probes, 5);
            }
            other => panic!("expected SuggestionsExhausted, got {other:?}"),
        }
    }

    #[test]
    fn suggest_succeeds_just_under_the_cap() {
        let reg = UsernameRegistry::with_config(Config { max_suffix_probes: 5 });
        reg.register_username("snug1", owner("u1"));
        reg.register_username("snug3", owner("u2"));

        let got = reg.suggest_alternatives("snug").unwrap();
        assert_eq!(got, vec!["snug2", "snug4", "snug5"]);
    }

    #[test]
    fn empty_string_is_a_first_class_key() {
        let reg = UsernameRegistry::new();
        assert!(reg.check_availability(""));
        assert!(reg.register_username("   ", owner("u1")));
        assert!(!reg.check_availability(""));
        assert_eq!(reg.attempt_count(""), 2);
    }
}
