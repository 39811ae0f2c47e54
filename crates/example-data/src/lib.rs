//! Curated demonstration data for the telecare backend.
//!
//! This crate carries the seed catalogue applied at startup when seeding
//! is enabled: five demo doctors, a set of editorial articles, and daily
//! health tips. It is deliberately independent of backend domain types to
//! avoid circular dependencies; the backend maps these records into its
//! own entities.
//!
//! # Example
//!
//! ```
//! let catalogue = example_data::catalogue();
//! catalogue.validate().expect("curated data is internally consistent");
//! assert_eq!(catalogue.doctors.len(), 5);
//! ```

mod catalogue;

pub use catalogue::catalogue;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Consistency failures in a seed catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    /// Two doctors share a login email.
    #[error("duplicate doctor email: {email}")]
    DuplicateEmail {
        /// The offending address.
        email: String,
    },
    /// Two articles or two tips share an id.
    #[error("duplicate content id: {id}")]
    DuplicateContentId {
        /// The offending id.
        id: String,
    },
    /// A doctor's consultation fee is zero.
    #[error("doctor {email} has a zero consultation fee")]
    ZeroFee {
        /// The doctor's address.
        email: String,
    },
    /// A password is shorter than the provider minimum.
    #[error("doctor {email} has a password shorter than {min} characters")]
    WeakPassword {
        /// The doctor's address.
        email: String,
        /// The minimum accepted length.
        min: usize,
    },
}

/// Minimum password length accepted by the identity provider.
const PASSWORD_MIN: usize = 6;

/// A demo doctor account with its professional profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedDoctor {
    /// Login email, unique within the catalogue.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Self-reported gender.
    pub gender: String,
    /// Age in years.
    pub age: u32,
    /// Medical specialization.
    pub specialization: String,
    /// Years of practice.
    pub experience: u32,
    /// Consultation fee in currency minor units.
    pub consultation_fee: u32,
    /// Ordered expertise tags.
    pub expertise: Vec<String>,
    /// Short biography.
    pub about: String,
}

/// A demo editorial article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedArticle {
    /// Stable id, unique within the catalogue.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Editorial category: `illness`, `herbal`, or `wellness`.
    pub category: String,
    /// Hero image URL.
    pub image: String,
    /// Teaser shown in list views.
    pub excerpt: String,
    /// Full body text.
    pub content: String,
    /// Display reading-time label.
    pub read_time: String,
    /// Publication date, `YYYY-MM-DD`.
    pub published_at: String,
}

/// A demo health tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedTip {
    /// Stable id, unique within the catalogue.
    pub id: String,
    /// Tip headline.
    pub title: String,
    /// One-paragraph body.
    pub description: String,
    /// Icon name rendered by the client.
    pub icon: String,
    /// Display category label.
    pub category: String,
}

/// The full seed catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedCatalogue {
    /// Demo doctor accounts.
    pub doctors: Vec<SeedDoctor>,
    /// Editorial articles.
    pub articles: Vec<SeedArticle>,
    /// Daily health tips.
    pub tips: Vec<SeedTip>,
}

impl SeedCatalogue {
    /// Check internal consistency: unique emails and ids, positive fees,
    /// and provider-acceptable passwords.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogueError`] found.
    pub fn validate(&self) -> Result<(), CatalogueError> {
        let mut emails = HashSet::new();
        for doctor in &self.doctors {
            if !emails.insert(doctor.email.as_str()) {
                return Err(CatalogueError::DuplicateEmail {
                    email: doctor.email.clone(),
                });
            }
            if doctor.consultation_fee == 0 {
                return Err(CatalogueError::ZeroFee {
                    email: doctor.email.clone(),
                });
            }
            if doctor.password.chars().count() < PASSWORD_MIN {
                return Err(CatalogueError::WeakPassword {
                    email: doctor.email.clone(),
                    min: PASSWORD_MIN,
                });
            }
        }

        let mut ids = HashSet::new();
        for id in self
            .articles
            .iter()
            .map(|article| article.id.as_str())
            .chain(self.tips.iter().map(|tip| tip.id.as_str()))
        {
            if !ids.insert(id) {
                return Err(CatalogueError::DuplicateContentId { id: id.to_owned() });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for catalogue validation.
    use super::*;

    fn doctor(email: &str) -> SeedDoctor {
        SeedDoctor {
            email: email.to_owned(),
            password: "doctor123".to_owned(),
            name: "Dr. Demo".to_owned(),
            phone: "+1 (555) 000-0000".to_owned(),
            gender: "Female".to_owned(),
            age: 40,
            specialization: "General Physician".to_owned(),
            experience: 10,
            consultation_fee: 60,
            expertise: vec!["Primary Care".to_owned()],
            about: "Demo doctor.".to_owned(),
        }
    }

    fn minimal() -> SeedCatalogue {
        SeedCatalogue {
            doctors: vec![doctor("a@example.com"), doctor("b@example.com")],
            articles: Vec::new(),
            tips: Vec::new(),
        }
    }

    #[test]
    fn valid_catalogue_passes() {
        minimal().validate().expect("valid catalogue");
    }

    #[test]
    fn duplicate_emails_fail() {
        let mut catalogue = minimal();
        catalogue.doctors.push(doctor("a@example.com"));
        let err = catalogue.validate().expect_err("duplicate email");
        assert!(matches!(err, CatalogueError::DuplicateEmail { .. }));
    }

    #[test]
    fn zero_fees_fail() {
        let mut catalogue = minimal();
        if let Some(first) = catalogue.doctors.first_mut() {
            first.consultation_fee = 0;
        }
        let err = catalogue.validate().expect_err("zero fee");
        assert!(matches!(err, CatalogueError::ZeroFee { .. }));
    }

    #[test]
    fn short_passwords_fail() {
        let mut catalogue = minimal();
        if let Some(first) = catalogue.doctors.first_mut() {
            first.password = "short".to_owned();
        }
        let err = catalogue.validate().expect_err("weak password");
        assert!(matches!(err, CatalogueError::WeakPassword { .. }));
    }

    #[test]
    fn duplicate_content_ids_fail_across_articles_and_tips() {
        let mut catalogue = minimal();
        catalogue.articles.push(SeedArticle {
            id: "shared".to_owned(),
            title: "t".to_owned(),
            category: "wellness".to_owned(),
            image: String::new(),
            excerpt: String::new(),
            content: String::new(),
            read_time: "1 min read".to_owned(),
            published_at: "2025-10-01".to_owned(),
        });
        catalogue.tips.push(SeedTip {
            id: "shared".to_owned(),
            title: "t".to_owned(),
            description: String::new(),
            icon: "apple".to_owned(),
            category: "Wellness".to_owned(),
        });
        let err = catalogue.validate().expect_err("duplicate id");
        assert!(matches!(err, CatalogueError::DuplicateContentId { .. }));
    }
}
