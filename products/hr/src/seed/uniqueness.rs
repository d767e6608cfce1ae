use std::collections::HashSet;

use rand::Rng;

use super::generator::phone_number;
use crate::accounts::new_user_id;

/// Values handed out during one seeding run, plus any reserved up front.
/// Each `claim_*` returns a value not seen before and records it.
#[derive(Debug, Default)]
pub struct UniquenessRegistry {
    emails: HashSet<String>,
    phones: HashSet<String>,
    user_ids: HashSet<String>,
}

impl UniquenessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a random `0..100` number before `@` until the address is free.
    pub fn claim_email<R: Rng + ?Sized>(&mut self, rng: &mut R, email: String) -> String {
        let mut candidate = email;
        while self.emails.contains(&candidate) {
            candidate = candidate.replacen('@', &format!("{}@", rng.gen_range(0..100)), 1);
        }
        self.emails.insert(candidate.clone());
        candidate
    }

    pub fn claim_phone<R: Rng + ?Sized>(&mut self, rng: &mut R, phone: String) -> String {
        let mut candidate = phone;
        while self.phones.contains(&candidate) {
            candidate = phone_number(rng);
        }
        self.phones.insert(candidate.clone());
        candidate
    }

    pub fn claim_user_id(&mut self) -> String {
        let mut candidate = new_user_id();
        while self.user_ids.contains(&candidate) {
            candidate = new_user_id();
        }
        self.user_ids.insert(candidate.clone());
        candidate
    }

    /// Marks a value that already exists elsewhere as taken.
    pub fn reserve_email(&mut self, email: String) {
        self.emails.insert(email);
    }

    pub fn reserve_phone(&mut self, phone: String) {
        self.phones.insert(phone);
    }

    pub fn reserve_user_id(&mut self, user_id: String) {
        self.user_ids.insert(user_id);
    }

    pub fn len(&self) -> usize {
        self.user_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.user_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn colliding_email_gets_number_before_at() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut registry = UniquenessRegistry::new();
        let first = registry.claim_email(&mut rng, "ada.lee@hr.example.com".into());
        let second = registry.claim_email(&mut rng, "ada.lee@hr.example.com".into());
        assert_eq!(first, "ada.lee@hr.example.com");
        assert_ne!(second, first);
        assert!(second.starts_with("ada.lee"));
        assert!(second.ends_with("@hr.example.com"));
        let digits = &second["ada.lee".len()..second.find('@').unwrap()];
        assert!(!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn repeated_claims_never_repeat() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut registry = UniquenessRegistry::new();
        let mut emails = HashSet::new();
        let mut phones = HashSet::new();
        let mut ids = HashSet::new();
        for _ in 0..300 {
            assert!(emails.insert(registry.claim_email(&mut rng, "same@x.example.com".into())));
            assert!(phones.insert(registry.claim_phone(&mut rng, "(555) 555-5555".into())));
            assert!(ids.insert(registry.claim_user_id()));
        }
        assert_eq!(registry.len(), 300);
    }

    #[test]
    fn reserved_values_are_never_claimed() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut registry = UniquenessRegistry::new();
        registry.reserve_email("ada.lee@hr.example.com".into());
        registry.reserve_phone("(555) 555-5555".into());
        assert_ne!(
            registry.claim_email(&mut rng, "ada.lee@hr.example.com".into()),
            "ada.lee@hr.example.com"
        );
        assert_ne!(
            registry.claim_phone(&mut rng, "(555) 555-5555".into()),
            "(555) 555-5555"
        );
    }
}
