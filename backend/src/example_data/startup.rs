//! Startup seeding orchestration.
//!
//! Seeds the demo catalogue through the same identity service the HTTP
//! surface uses, so seeded doctors are real provider accounts that can
//! sign in. Re-running against an already-seeded store is harmless:
//! existing accounts are skipped and content records are overwritten in
//! place.

use std::sync::Arc;

use example_data::{SeedArticle, SeedDoctor, SeedTip};
use tracing::{debug, info};

use crate::domain::ports::{IdentityService, SignupProfile, SignupRequest};
use crate::domain::{
    Article, EmailAddress, Error, ErrorCode, HealthTip, Password, Records, Role,
};
use crate::example_data::config::ExampleDataSettings;

/// Counts reported after a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Doctor accounts created in this run.
    pub doctors_created: usize,
    /// Doctor accounts skipped because the email was already registered.
    pub doctors_existing: usize,
    /// Article records written.
    pub articles: usize,
    /// Health tip records written.
    pub tips: usize,
}

fn signup_request(doctor: &SeedDoctor) -> Result<SignupRequest, Error> {
    let email = EmailAddress::new(&doctor.email)
        .map_err(|error| Error::internal(format!("seed doctor email: {error}")))?;
    let password = Password::new(doctor.password.clone())
        .map_err(|error| Error::internal(format!("seed doctor password: {error}")))?;
    Ok(SignupRequest {
        email,
        password,
        name: doctor.name.clone(),
        role: Role::Doctor,
        profile: SignupProfile {
            phone: Some(doctor.phone.clone()),
            age: Some(doctor.age),
            gender: Some(doctor.gender.clone()),
            address: None,
            specialization: Some(doctor.specialization.clone()),
            experience: Some(doctor.experience),
            consultation_fee: Some(doctor.consultation_fee),
            expertise: Some(doctor.expertise.clone()),
            about: Some(doctor.about.clone()),
        },
    })
}

fn article_record(article: &SeedArticle) -> Result<Article, Error> {
    let published_at = article
        .published_at
        .parse()
        .map_err(|error| Error::internal(format!("seed article date: {error}")))?;
    Ok(Article {
        id: article.id.clone(),
        title: article.title.clone(),
        category: article.category.clone(),
        image: article.image.clone(),
        excerpt: article.excerpt.clone(),
        content: article.content.clone(),
        read_time: article.read_time.clone(),
        published_at,
    })
}

fn tip_record(tip: &SeedTip) -> HealthTip {
    HealthTip {
        id: tip.id.clone(),
        title: tip.title.clone(),
        description: tip.description.clone(),
        icon: tip.icon.clone(),
        category: tip.category.clone(),
    }
}

/// Apply the demo catalogue on startup when enabled.
pub async fn seed_example_data_on_startup(
    settings: &ExampleDataSettings,
    identity: &Arc<dyn IdentityService>,
    records: &Records,
) -> Result<Option<SeedOutcome>, Error> {
    if !settings.is_enabled() {
        info!(reason = "disabled", "example data seeding skipped");
        return Ok(None);
    }

    let catalogue = example_data::catalogue();
    catalogue
        .validate()
        .map_err(|error| Error::internal(format!("seed catalogue invalid: {error}")))?;

    let mut outcome = SeedOutcome {
        doctors_created: 0,
        doctors_existing: 0,
        articles: 0,
        tips: 0,
    };

    for doctor in &catalogue.doctors {
        let request = signup_request(doctor)?;
        match identity.signup(request).await {
            Ok(_) => outcome.doctors_created += 1,
            // Duplicate emails mean a previous run already seeded this
            // account; everything else is a real failure.
            Err(error) if error.code() == ErrorCode::InvalidRequest => {
                debug!(email = %doctor.email, "seed doctor already registered");
                outcome.doctors_existing += 1;
            }
            Err(error) => return Err(error),
        }
    }

    for article in &catalogue.articles {
        records.put_article(&article_record(article)?).await?;
        outcome.articles += 1;
    }
    for tip in &catalogue.tips {
        records.put_tip(&tip_record(tip)).await?;
        outcome.tips += 1;
    }

    info!(
        doctors_created = outcome.doctors_created,
        doctors_existing = outcome.doctors_existing,
        articles = outcome.articles,
        tips = outcome.tips,
        "example data seeding applied"
    );
    Ok(Some(outcome))
}
